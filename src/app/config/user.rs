use serde::{Deserialize, Serialize};

use crate::app::keys::KeyConfig;
use crate::audio::VisualizerSettings;
use crate::intro::IntroSettings;
use crate::panel::PanelSettings;
use crate::ui::theme::Theme;

/// User-editable configuration (ReadOnly by App after load)
/// stored in `config.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default = "default_music_dir")]
    pub music_directory: String,
    /// Defaults to the platform data directory when unset.
    #[serde(default)]
    pub assets_directory: Option<String>,
    #[serde(default)]
    pub keys: KeyConfig,
    #[serde(default)]
    pub panel: PanelSettings,
    #[serde(default)]
    pub visualizer: VisualizerSettings,
    #[serde(default)]
    pub playback: PlaybackSettings,
    #[serde(default)]
    pub intro: IntroSettings,
    #[serde(default)]
    pub effects: EffectSettings,
    #[serde(default)]
    pub theme: Theme,
}

fn default_music_dir() -> String {
    let home = dirs::home_dir()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| ".".to_string());
    format!("{}/Music", home)
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            music_directory: default_music_dir(),
            assets_directory: None,
            keys: KeyConfig::default(),
            panel: PanelSettings::default(),
            visualizer: VisualizerSettings::default(),
            playback: PlaybackSettings::default(),
            intro: IntroSettings::default(),
            effects: EffectSettings::default(),
            theme: Theme::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Start the first track on launch.
    pub autoplay: bool,
    pub autoplay_delay_seconds: f32,
    pub seek_step_seconds: f32,
    pub volume_step: f32,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            autoplay: true,
            autoplay_delay_seconds: 0.1,
            seek_step_seconds: 5.0,
            volume_step: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectSettings {
    pub pulse_interval_seconds: f32,
    pub pulse_speed: f32,
    pub pulse_min_scale: f32,
    pub pulse_max_scale: f32,
    pub pulse_intensity: f32,
    pub light_count: usize,
    /// Degrees per second.
    pub light_speed: f32,
    /// Degrees per second.
    pub spin_speed: f32,
}

impl Default for EffectSettings {
    fn default() -> Self {
        Self {
            pulse_interval_seconds: 3.0,
            pulse_speed: 1.5,
            pulse_min_scale: 0.98,
            pulse_max_scale: 1.05,
            pulse_intensity: 0.05,
            light_count: 8,
            light_speed: 180.0,
            spin_speed: 50.0,
        }
    }
}
