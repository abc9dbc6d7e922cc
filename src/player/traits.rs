use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::playlist::Clip;
use crate::error::PlayerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerState {
    Playing,
    Paused,
    #[default]
    Stopped,
}

/// The audio engine seen from the playback controller 🎵
///
/// Implementations own decoding and the output device; the controller owns
/// the clock and every state decision.
pub trait AudioOutput {
    /// Make `clip` the current clip. Stops whatever was playing.
    fn load(&mut self, clip: &Clip) -> Result<(), PlayerError>;

    /// Start the current clip from `position`, replacing any running voice.
    fn start(&mut self, position: Duration) -> Result<(), PlayerError>;

    /// Continue a paused voice where it stopped.
    fn resume(&mut self) -> Result<(), PlayerError>;

    fn pause(&mut self);

    fn stop(&mut self);

    /// Output gain in `[0, 1]`.
    fn set_volume(&mut self, volume: f32);

    /// True once the running voice has run out of samples. Ends the track
    /// even when the tagged length claims there is more to come.
    fn is_drained(&self) -> bool {
        false
    }
}

/// Silent output used when no device could be opened.
#[derive(Debug, Default)]
pub struct NullOutput {
    loaded: bool,
}

impl AudioOutput for NullOutput {
    fn load(&mut self, clip: &Clip) -> Result<(), PlayerError> {
        tracing::debug!(clip = %clip.name, "null output: load");
        self.loaded = true;
        Ok(())
    }

    fn start(&mut self, _position: Duration) -> Result<(), PlayerError> {
        if self.loaded {
            Ok(())
        } else {
            Err(PlayerError::NoClip)
        }
    }

    fn resume(&mut self) -> Result<(), PlayerError> {
        self.start(Duration::ZERO)
    }

    fn pause(&mut self) {}

    fn stop(&mut self) {}

    fn set_volume(&mut self, _volume: f32) {}
}
