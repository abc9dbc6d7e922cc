//! Decorative per-frame effects: border pulse, spinning album glyph, neon
//! running lights, control press feedback and the track-change bump.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use super::animator::{AnimationId, Animator};
use super::easing::Easing;
use super::tween::{secs, Lerp, Tween};

/// Periodic pulse: wait `interval`, swell and relax over `1 / speed`
/// seconds, repeat.
#[derive(Debug, Clone)]
pub struct Pulse {
    interval: f32,
    length: f32,
    min_scale: f32,
    max_scale: f32,
    intensity: f32,
    easing: Easing,
    waited: f32,
    phase: Option<Tween<f32>>,
}

impl Pulse {
    pub fn new(interval: Duration, speed: f32) -> Self {
        Self {
            interval: interval.as_secs_f32(),
            length: if speed > 0.0 { 1.0 / speed } else { 0.0 },
            min_scale: 0.98,
            max_scale: 1.05,
            intensity: 0.05,
            easing: Easing::EaseInOut,
            waited: 0.0,
            phase: None,
        }
    }

    pub fn with_scale(mut self, min_scale: f32, max_scale: f32, intensity: f32) -> Self {
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self.intensity = intensity;
        self
    }

    pub fn update(&mut self, dt: f32) {
        match self.phase.as_mut() {
            Some(phase) => {
                phase.advance(dt);
                if phase.is_finished() {
                    self.phase = None;
                    self.waited = 0.0;
                }
            }
            None => {
                self.waited += dt.max(0.0);
                if self.waited >= self.interval {
                    self.phase = Some(Tween::new(
                        0.0,
                        1.0,
                        secs(self.length),
                        Easing::Linear,
                    ));
                }
            }
        }
    }

    /// Eased swell in `[0, 1]`: rises for the first half of a pulse and
    /// falls back for the second, `0.0` between pulses.
    pub fn level(&self) -> f32 {
        match &self.phase {
            Some(phase) => {
                let p = phase.value();
                let hump = if p < 0.5 { p * 2.0 } else { 2.0 - p * 2.0 };
                self.easing.apply(hump)
            }
            None => 0.0,
        }
    }

    pub fn scale(&self) -> f32 {
        if self.phase.is_none() {
            return 1.0;
        }
        let target = self.min_scale.lerp(self.max_scale, self.level());
        1.0 + (target - 1.0) * self.intensity
    }

    pub fn is_pulsing(&self) -> bool {
        self.phase.is_some()
    }
}

/// Continuous rotation in degrees, advanced only while `active`.
#[derive(Debug, Clone, Default)]
pub struct Spin {
    speed: f32,
    angle: f32,
}

impl Spin {
    pub fn new(degrees_per_second: f32) -> Self {
        Self {
            speed: degrees_per_second,
            angle: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32, active: bool) {
        if active {
            self.angle = (self.angle + self.speed * dt).rem_euclid(360.0);
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn frame<'a>(&self, frames: &[&'a str]) -> &'a str {
        if frames.is_empty() {
            return "";
        }
        let idx = (self.angle / 360.0 * frames.len() as f32) as usize;
        frames[idx.min(frames.len() - 1)]
    }
}

/// Evenly spaced lights chasing around a perimeter while hovered.
#[derive(Debug, Clone)]
pub struct RunningLights {
    count: usize,
    speed: f32,
    angle: f32,
    hovered: bool,
}

impl RunningLights {
    pub fn new(count: usize, degrees_per_second: f32) -> Self {
        Self {
            count,
            speed: degrees_per_second,
            angle: 0.0,
            hovered: false,
        }
    }

    /// Hover starts the chase from the top; leaving hides the lights.
    pub fn set_hovered(&mut self, hovered: bool) {
        if hovered && !self.hovered {
            self.angle = 0.0;
        }
        self.hovered = hovered;
    }

    pub fn is_visible(&self) -> bool {
        self.hovered
    }

    pub fn update(&mut self, dt: f32) {
        if self.hovered {
            self.angle += self.speed * dt;
            if self.angle >= 360.0 {
                self.angle = 0.0;
            }
        }
    }

    /// Light positions as offsets along a perimeter of `perimeter` cells.
    pub fn offsets(&self, perimeter: usize) -> Vec<usize> {
        if !self.hovered || perimeter == 0 || self.count == 0 {
            return Vec::new();
        }
        let step = 360.0 / self.count as f32;
        (0..self.count)
            .map(|i| {
                let angle = (self.angle + i as f32 * step).rem_euclid(360.0);
                ((angle / 360.0) * perimeter as f32) as usize % perimeter
            })
            .collect()
    }
}

/// Highlight that snaps to full on press and fades out; a second press
/// restarts it.
#[derive(Debug, Default)]
pub struct PressFeedback {
    level: Rc<Cell<f32>>,
    running: Option<AnimationId>,
}

impl PressFeedback {
    pub const DURATION: Duration = Duration::from_millis(200);

    pub fn press(&mut self, animator: &mut Animator) {
        if let Some(id) = self.running.take() {
            animator.cancel(id);
        }
        self.level.set(1.0);
        let level = self.level.clone();
        self.running = Some(animator.animate(
            1.0f32,
            0.0,
            Self::DURATION,
            Easing::EaseOut,
            move |v| level.set(v),
            || {},
        ));
    }

    pub fn level(&self) -> f32 {
        self.level.get()
    }
}

/// Album glyph "breath" on track change: scale snaps to 0.8 and eases back.
#[derive(Debug)]
pub struct TrackBump {
    scale: Rc<Cell<f32>>,
    running: Option<AnimationId>,
}

impl Default for TrackBump {
    fn default() -> Self {
        Self {
            scale: Rc::new(Cell::new(1.0)),
            running: None,
        }
    }
}

impl TrackBump {
    pub const DURATION: Duration = Duration::from_millis(100);

    pub fn trigger(&mut self, animator: &mut Animator) {
        if let Some(id) = self.running.take() {
            animator.cancel(id);
        }
        self.scale.set(0.8);
        let scale = self.scale.clone();
        self.running = Some(animator.animate(
            0.8f32,
            1.0,
            Self::DURATION,
            Easing::EaseOut,
            move |v| scale.set(v),
            || {},
        ));
    }

    pub fn scale(&self) -> f32 {
        self.scale.get()
    }
}
