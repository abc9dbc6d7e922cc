//! `rodio` implementation of [`AudioOutput`], plus the sample tap that
//! feeds the visualizer.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use tracing::debug;

use super::playlist::Clip;
use super::traits::AudioOutput;
use crate::audio::SampleBuffer;
use crate::error::PlayerError;

/// Samples collected before taking the buffer lock.
const TAP_CHUNK: usize = 1024;

/// The system output stream. Must outlive every [`RodioOutput`] made from it.
pub struct AudioDevice {
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl AudioDevice {
    pub fn open() -> Result<Self, PlayerError> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| PlayerError::Device(e.to_string()))?;
        Ok(Self {
            _stream: stream,
            handle,
        })
    }

    /// A new independent voice on this device. With `tap`, everything it
    /// plays is copied into the buffer.
    pub fn output(&self, tap: Option<SampleBuffer>) -> RodioOutput {
        RodioOutput {
            handle: self.handle.clone(),
            sink: None,
            clip: None,
            volume: 1.0,
            tap,
        }
    }
}

pub struct RodioOutput {
    handle: OutputStreamHandle,
    sink: Option<Sink>,
    clip: Option<PathBuf>,
    volume: f32,
    tap: Option<SampleBuffer>,
}

impl AudioOutput for RodioOutput {
    fn load(&mut self, clip: &Clip) -> Result<(), PlayerError> {
        self.stop();
        if !clip.path.is_file() {
            self.clip = None;
            return Err(PlayerError::MissingFile(clip.path.clone()));
        }
        self.clip = Some(clip.path.clone());
        Ok(())
    }

    fn start(&mut self, position: Duration) -> Result<(), PlayerError> {
        let path = self.clip.clone().ok_or(PlayerError::NoClip)?;
        let file = File::open(&path)?;
        let decoder = Decoder::new(BufReader::new(file)).map_err(|e| PlayerError::Decode {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        let sink = Sink::try_new(&self.handle).map_err(|e| PlayerError::Device(e.to_string()))?;
        sink.set_volume(self.volume);

        let source = decoder.convert_samples::<f32>().skip_duration(position);
        match &self.tap {
            Some(tap) => {
                tap.clear();
                sink.append(SampleTap::new(source, tap.clone()));
            }
            None => sink.append(source),
        }

        if let Some(old) = self.sink.replace(sink) {
            old.stop();
        }
        debug!(path = %path.display(), ?position, "voice started");
        Ok(())
    }

    fn resume(&mut self) -> Result<(), PlayerError> {
        match &self.sink {
            Some(sink) => {
                sink.play();
                Ok(())
            }
            None => self.start(Duration::ZERO),
        }
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        if let Some(tap) = &self.tap {
            tap.clear();
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(sink) = &self.sink {
            sink.set_volume(volume);
        }
    }

    fn is_drained(&self) -> bool {
        self.sink.as_ref().map(|s| s.empty()).unwrap_or(false)
    }
}

/// Pass-through source that copies every sample into a [`SampleBuffer`].
pub struct SampleTap<S> {
    inner: S,
    buffer: SampleBuffer,
    pending: Vec<f32>,
}

impl<S> SampleTap<S>
where
    S: Source<Item = f32>,
{
    pub fn new(inner: S, buffer: SampleBuffer) -> Self {
        Self {
            inner,
            buffer,
            pending: Vec::with_capacity(TAP_CHUNK),
        }
    }

    fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let channels = self.inner.channels().max(1) as usize;
        self.buffer
            .push(&self.pending, channels, self.inner.sample_rate());
        self.pending.clear();
    }
}

impl<S> Iterator for SampleTap<S>
where
    S: Source<Item = f32>,
{
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        let sample = self.inner.next();
        match sample {
            Some(s) => {
                self.pending.push(s);
                let channels = self.inner.channels().max(1) as usize;
                if self.pending.len() >= TAP_CHUNK && self.pending.len() % channels == 0 {
                    self.flush();
                }
            }
            None => self.flush(),
        }
        sample
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<S> Source for SampleTap<S>
where
    S: Source<Item = f32>,
{
    fn current_frame_len(&self) -> Option<usize> {
        self.inner.current_frame_len()
    }

    fn channels(&self) -> u16 {
        self.inner.channels()
    }

    fn sample_rate(&self) -> u32 {
        self.inner.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        self.inner.total_duration()
    }
}
