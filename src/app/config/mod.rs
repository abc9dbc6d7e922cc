use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

pub mod user;

pub use user::{EffectSettings, PlaybackSettings, UserConfig};

use crate::app::cli::Args;

pub struct AppConfig;

impl AppConfig {
    pub fn get_config_dir() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let xdg_dir = home.join(".config").join("neonbox");

        // Ensure it exists
        if !xdg_dir.exists() {
            let _ = fs::create_dir_all(&xdg_dir);
        }

        xdg_dir
    }

    pub fn get_config_path() -> PathBuf {
        Self::get_config_dir().join("config.toml")
    }

    pub fn parse(content: &str) -> Result<UserConfig, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn generate() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&UserConfig::default())
    }

    /// Load `path`, or the default location. A missing file is created with
    /// defaults; a broken one is reported and ignored.
    pub fn load(path: Option<&Path>) -> UserConfig {
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::get_config_path);

        if !config_path.exists() {
            let config = UserConfig::default();
            match Self::generate() {
                Ok(content) => match fs::write(&config_path, content) {
                    Ok(()) => info!(path = %config_path.display(), "wrote default config"),
                    Err(e) => warn!(
                        path = %config_path.display(),
                        error = %e,
                        "could not write default config"
                    ),
                },
                Err(e) => warn!(error = %e, "could not serialize default config"),
            }
            return config;
        }

        match fs::read_to_string(&config_path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                warn!(path = %config_path.display(), error = %e, "invalid config, using defaults");
                UserConfig::default()
            }),
            Err(e) => {
                warn!(
                    path = %config_path.display(),
                    error = %e,
                    "could not read config, using defaults"
                );
                UserConfig::default()
            }
        }
    }

    /// Command-line flags win over the file.
    pub fn apply_args(config: &mut UserConfig, args: &Args) {
        if let Some(dir) = &args.music_dir {
            config.music_directory = dir.to_string_lossy().to_string();
        }
        if let Some(dir) = &args.assets_dir {
            config.assets_directory = Some(dir.to_string_lossy().to_string());
        }
        if args.no_intro {
            config.intro.enabled = false;
        }
    }
}
