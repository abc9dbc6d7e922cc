//! File logging. The terminal belongs to the UI, so every event goes to a
//! daily log file next to the config.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `neonbox=debug`.
pub const LOG_ENV: &str = "NEONBOX_LOG";

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Start logging into `dir/neonbox.log.<date>`. Keep the guard alive until
/// exit or buffered lines are lost.
pub fn init(dir: &Path) -> anyhow::Result<WorkerGuard> {
    let appender = tracing_appender::rolling::daily(dir, "neonbox.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("logger already set: {e}"))?;

    Ok(guard)
}
