use serde::{Deserialize, Serialize};

use super::SpectrumSource;
use crate::anim::{Lerp, Rgb};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerSettings {
    pub bars: usize,
    /// Linear gain from raw amplitude to normalized bar height.
    pub gain: f32,
    /// Approach rate of the exponential smoothing, per second.
    pub smoothing: f32,
    /// Lowest height a bar rests at.
    pub floor: f32,
    pub low_color: Rgb,
    pub high_color: Rgb,
}

impl Default for VisualizerSettings {
    fn default() -> Self {
        Self {
            bars: 64,
            gain: 50.0,
            smoothing: 10.0,
            floor: 0.1,
            low_color: Rgb::BLUE,
            high_color: Rgb::RED,
        }
    }
}

/// Spectrum bars with smoothed heights in `[floor, 1]`.
#[derive(Debug, Clone)]
pub struct VisualizerSampler {
    settings: VisualizerSettings,
    heights: Vec<f32>,
}

impl VisualizerSampler {
    pub fn new(settings: VisualizerSettings) -> Self {
        let heights = vec![settings.floor; settings.bars];
        Self { settings, heights }
    }

    pub fn settings(&self) -> &VisualizerSettings {
        &self.settings
    }

    pub fn target_height(&self, amplitude: f32) -> f32 {
        let floor = self.settings.floor.clamp(0.0, 1.0);
        if !amplitude.is_finite() {
            return floor;
        }
        (amplitude * self.settings.gain).clamp(floor, 1.0)
    }

    /// Sample one frame from `source` and ease every bar toward it.
    pub fn update(&mut self, source: &mut dyn SpectrumSource, dt: f32) {
        let amplitudes = source.amplitudes(self.settings.bars);
        let targets: Vec<f32> = (0..self.heights.len())
            .map(|i| self.target_height(amplitudes.get(i).copied().unwrap_or(0.0)))
            .collect();
        let t = (self.settings.smoothing * dt.max(0.0)).min(1.0);
        for (height, target) in self.heights.iter_mut().zip(targets) {
            *height = height.lerp(target, t);
        }
    }

    /// Drop every bar back to rest, e.g. after a stop.
    pub fn reset(&mut self) {
        self.heights.fill(self.settings.floor);
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    pub fn color_for(&self, height: f32) -> Rgb {
        self.settings
            .low_color
            .lerp(self.settings.high_color, height.clamp(0.0, 1.0))
    }

    pub fn colors(&self) -> Vec<Rgb> {
        self.heights.iter().map(|h| self.color_for(*h)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<f32>);

    impl SpectrumSource for Fixed {
        fn amplitudes(&mut self, buckets: usize) -> Vec<f32> {
            let mut v = self.0.clone();
            v.resize(buckets, 0.0);
            v
        }
    }

    fn sampler(bars: usize) -> VisualizerSampler {
        VisualizerSampler::new(VisualizerSettings {
            bars,
            ..VisualizerSettings::default()
        })
    }

    #[test]
    fn test_gain_and_clamp() {
        let s = sampler(4);
        assert_eq!(s.target_height(0.0), 0.1);
        assert!((s.target_height(0.01) - 0.5).abs() < 1e-6);
        assert_eq!(s.target_height(3.0), 1.0);
        assert_eq!(s.target_height(f32::NAN), 0.1);
    }

    #[test]
    fn test_smoothing_moves_partway() {
        let mut s = sampler(2);
        let mut source = Fixed(vec![1.0, 0.0]);
        s.update(&mut source, 0.05);
        // t = 10 * 0.05 = 0.5 -> halfway from 0.1 to 1.0
        assert!((s.heights()[0] - 0.55).abs() < 1e-5);
        assert_eq!(s.heights()[1], 0.1);
    }

    #[test]
    fn test_large_dt_snaps_without_overshoot() {
        let mut s = sampler(1);
        let mut source = Fixed(vec![1.0]);
        s.update(&mut source, 5.0);
        assert!((s.heights()[0] - 1.0).abs() < 1e-6);
        assert!(s.heights()[0] <= 1.0);
    }

    #[test]
    fn test_colour_follows_height() {
        let mut s = sampler(1);
        assert_eq!(s.color_for(0.0), Rgb::BLUE);
        assert_eq!(s.color_for(1.0), Rgb::RED);
        let mut source = Fixed(vec![1.0]);
        s.update(&mut source, 1.0);
        assert_eq!(s.colors(), vec![Rgb::RED]);

        s.reset();
        assert_eq!(s.heights(), &[0.1]);
    }

    #[test]
    fn test_short_source_is_padded() {
        let mut s = sampler(3);
        let mut source = Fixed(vec![]);
        s.update(&mut source, 1.0);
        assert_eq!(s.heights(), &[0.1, 0.1, 0.1]);
    }
}
