use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    // Global
    pub quit: String,
    pub toggle_panel: String,
    pub close_panel: String,
    pub toggle_keyhints: String,
    pub skip_intro: String,

    // Transport
    pub play_pause: String,
    pub stop: String,
    pub next_track: String,
    pub prev_track: String,

    // Seek
    pub seek_forward: String,
    pub seek_forward_alt: String,
    pub seek_backward: String,
    pub seek_backward_alt: String,

    // Volume
    pub volume_up: String,
    pub volume_down: String,
    pub mute: String,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            toggle_panel: "m".to_string(),
            close_panel: "Esc".to_string(),
            toggle_keyhints: "?".to_string(),
            skip_intro: "Enter".to_string(),

            play_pause: "Space".to_string(),
            stop: "s".to_string(),
            next_track: "n".to_string(),
            prev_track: "p".to_string(),

            seek_forward: "l".to_string(),
            seek_forward_alt: "Right".to_string(),
            seek_backward: "h".to_string(),
            seek_backward_alt: "Left".to_string(),

            volume_up: "+".to_string(),
            volume_down: "-".to_string(),
            mute: "x".to_string(),
        }
    }
}

impl KeyConfig {
    pub fn matches(&self, event: KeyEvent, key_str: &str) -> bool {
        match key_str {
            "Space" => event.code == KeyCode::Char(' '),
            "Enter" => event.code == KeyCode::Enter,
            "Backspace" => event.code == KeyCode::Backspace,
            "Esc" => event.code == KeyCode::Esc,
            "Tab" => event.code == KeyCode::Tab,
            "BackTab" => event.code == KeyCode::BackTab,
            "Up" => event.code == KeyCode::Up,
            "Down" => event.code == KeyCode::Down,
            "Left" => event.code == KeyCode::Left,
            "Right" => event.code == KeyCode::Right,
            s if s.chars().count() == 1 => match s.chars().next() {
                // Uppercase bindings also match shift+lowercase
                Some(ch) if ch.is_uppercase() => {
                    event.code == KeyCode::Char(ch)
                        || (event.code == KeyCode::Char(ch.to_ascii_lowercase())
                            && event.modifiers.contains(KeyModifiers::SHIFT))
                }
                Some(ch) => event.code == KeyCode::Char(ch),
                None => false,
            },
            _ => false,
        }
    }

    /// Short label for the key hints bar.
    pub fn display(&self, key_str: &str) -> String {
        match key_str {
            "Up" => "↑".to_string(),
            "Down" => "↓".to_string(),
            "Left" => "←".to_string(),
            "Right" => "→".to_string(),
            "BackTab" => "S-Tab".to_string(),
            "Backspace" => "Bksp".to_string(),
            _ => key_str.to_string(),
        }
    }

    /// `(key, action)` pairs for the hints popup.
    pub fn hints(&self) -> Vec<(String, &'static str)> {
        vec![
            (self.display(&self.play_pause), "play / pause"),
            (self.display(&self.stop), "stop"),
            (self.display(&self.next_track), "next"),
            (self.display(&self.prev_track), "previous"),
            (
                format!(
                    "{}/{}",
                    self.display(&self.seek_backward),
                    self.display(&self.seek_forward)
                ),
                "seek",
            ),
            (
                format!("{}/{}", self.display(&self.volume_down), self.display(&self.volume_up)),
                "volume",
            ),
            (self.display(&self.mute), "mute"),
            (self.display(&self.toggle_panel), "panel"),
            (self.display(&self.quit), "quit"),
        ]
    }
}
