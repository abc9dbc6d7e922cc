use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use spectrum_analyzer::scaling::divide_by_N;
use spectrum_analyzer::windows::hann_window;
use spectrum_analyzer::{samples_fft_to_spectrum, FrequencyLimit};

use super::SpectrumSource;

/// Rolling mono window kept for the FFT.
const BUFFER_CAPACITY: usize = 8192;

/// FFT size (power of two).
const FFT_SIZE: usize = 2048;

const MIN_FREQ: f32 = 40.0;
const MAX_FREQ: f32 = 12_000.0;

#[derive(Debug)]
struct Tapped {
    samples: VecDeque<f32>,
    sample_rate: u32,
}

/// Lock-protected rolling buffer of the samples the output just played.
/// The audio thread writes, the UI thread reads.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    inner: Arc<Mutex<Tapped>>,
}

impl Default for SampleBuffer {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Tapped {
                samples: VecDeque::with_capacity(BUFFER_CAPACITY),
                sample_rate: 44_100,
            })),
        }
    }
}

impl SampleBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push interleaved samples, downmixing to mono.
    pub fn push(&self, interleaved: &[f32], channels: usize, sample_rate: u32) {
        let Ok(mut buf) = self.inner.lock() else {
            return;
        };
        buf.sample_rate = sample_rate;
        if channels > 1 {
            for frame in interleaved.chunks_exact(channels) {
                buf.samples.push_back(frame.iter().sum::<f32>() / channels as f32);
            }
        } else {
            buf.samples.extend(interleaved.iter().copied());
        }
        while buf.samples.len() > BUFFER_CAPACITY {
            buf.samples.pop_front();
        }
    }

    /// The newest `count` samples and their rate, or `None` if fewer have
    /// arrived so far.
    pub fn latest(&self, count: usize) -> Option<(Vec<f32>, u32)> {
        let buf = self.inner.lock().ok()?;
        if buf.samples.len() < count {
            return None;
        }
        let skip = buf.samples.len() - count;
        Some((buf.samples.iter().skip(skip).copied().collect(), buf.sample_rate))
    }

    pub fn clear(&self) {
        if let Ok(mut buf) = self.inner.lock() {
            buf.samples.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|b| b.samples.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Hann-windowed FFT over the tapped samples, grouped into log-spaced
/// buckets. Each bucket reports the loudest bin it covers.
#[derive(Debug, Clone)]
pub struct FftSpectrum {
    buffer: SampleBuffer,
}

impl FftSpectrum {
    pub fn new(buffer: SampleBuffer) -> Self {
        Self { buffer }
    }
}

impl SpectrumSource for FftSpectrum {
    fn amplitudes(&mut self, buckets: usize) -> Vec<f32> {
        let mut out = vec![0.0f32; buckets];
        if buckets == 0 {
            return out;
        }
        let Some((samples, sample_rate)) = self.buffer.latest(FFT_SIZE) else {
            return out;
        };

        let nyquist = sample_rate as f32 / 2.0;
        let top = MAX_FREQ.min(nyquist - 1.0);
        if top <= MIN_FREQ {
            return out;
        }

        let windowed = hann_window(&samples);
        let spectrum = match samples_fft_to_spectrum(
            &windowed,
            sample_rate,
            FrequencyLimit::Range(MIN_FREQ, top),
            Some(&divide_by_N),
        ) {
            Ok(s) => s,
            Err(e) => {
                tracing::debug!(error = ?e, "fft failed");
                return out;
            }
        };
        let bins = spectrum.data();
        if bins.is_empty() {
            return out;
        }

        let edges = bucket_edges(buckets, MIN_FREQ, top);
        for (i, bucket) in out.iter_mut().enumerate() {
            let (lo, hi) = (edges[i], edges[i + 1]);
            let mut loudest = None::<f32>;
            for (freq, value) in bins {
                let f = freq.val();
                if f < lo {
                    continue;
                }
                if f >= hi {
                    break;
                }
                loudest = Some(loudest.map_or(value.val(), |m| m.max(value.val())));
            }
            // Narrow low buckets can fall between bins; borrow the nearest.
            *bucket = loudest.unwrap_or_else(|| {
                let centre = (lo + hi) / 2.0;
                bins.iter()
                    .min_by(|a, b| {
                        (a.0.val() - centre)
                            .abs()
                            .total_cmp(&(b.0.val() - centre).abs())
                    })
                    .map(|(_, v)| v.val())
                    .unwrap_or(0.0)
            });
        }
        out
    }
}

/// `buckets + 1` log-spaced frequency edges from `min` to `max`.
fn bucket_edges(buckets: usize, min: f32, max: f32) -> Vec<f32> {
    let (log_min, log_max) = (min.ln(), max.ln());
    (0..=buckets)
        .map(|i| {
            let p = i as f32 / buckets as f32;
            (log_min + p * (log_max - log_min)).exp()
        })
        .collect()
}
