use std::path::PathBuf;

use clap::Parser;

/// neonbox - a neon music panel for your terminal 🎵
#[derive(Parser, Debug, Default)]
#[command(name = "neonbox", version, about)]
pub struct Args {
    /// Directory to build the playlist from (overrides config)
    #[arg(long, short = 'd')]
    pub music_dir: Option<PathBuf>,

    /// Directory holding the intro clip and other assets
    #[arg(long)]
    pub assets_dir: Option<PathBuf>,

    /// Skip the intro card
    #[arg(long)]
    pub no_intro: bool,

    /// Read configuration from this file instead of ~/.config/neonbox/config.toml
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Generate default config.toml to stdout
    #[arg(long)]
    pub generate_config: bool,
}
