pub mod controller;
pub mod observer;
pub mod playlist;
pub mod rodio_output;
pub mod traits;

use crate::audio::SampleBuffer;

pub use controller::{format_time, PlaybackController, PlaybackState, DEFAULT_VOLUME, END_EPSILON};
pub use observer::{EventBus, PlayerEvent, Subscription};
pub use playlist::{Clip, Playlist};
pub use rodio_output::{AudioDevice, RodioOutput};
pub use traits::{AudioOutput, NullOutput, PlayerState};

/// Open the default device, falling back to a silent output when there is
/// none. The device handle must be kept alive alongside the output.
pub fn open_output(tap: Option<SampleBuffer>) -> (Option<AudioDevice>, Box<dyn AudioOutput>) {
    match AudioDevice::open() {
        Ok(device) => {
            let output = device.output(tap);
            (Some(device), Box::new(output))
        }
        Err(e) => {
            tracing::warn!(error = %e, "no audio device, continuing silently");
            (None, Box::new(NullOutput::default()))
        }
    }
}
