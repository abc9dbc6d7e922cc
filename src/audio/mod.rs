pub mod spectrum;
pub mod visualizer;

pub use spectrum::{FftSpectrum, SampleBuffer};
pub use visualizer::{VisualizerSampler, VisualizerSettings};

/// Anything that can report per-bucket amplitudes for the current frame.
pub trait SpectrumSource {
    /// `buckets` amplitudes, low to high frequency. Silence is all zeros.
    fn amplitudes(&mut self, buckets: usize) -> Vec<f32>;
}
