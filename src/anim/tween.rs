use std::time::Duration;

use super::easing::Easing;

/// Linear interpolation between two values of the same type.
pub trait Lerp: Copy {
    fn lerp(self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

impl<A: Lerp, B: Lerp> Lerp for (A, B) {
    fn lerp(self, to: Self, t: f32) -> Self {
        (self.0.lerp(to.0, t), self.1.lerp(to.1, t))
    }
}

/// Seconds from config to a `Duration`. Negative and NaN become zero.
pub fn secs(value: f32) -> Duration {
    Duration::from_secs_f32(value.max(0.0).min(3600.0))
}

/// A single timed interpolation from `from` to `to`.
///
/// Time only moves when [`Tween::advance`] is called. Once the elapsed time
/// reaches the duration the value is exactly `to`, never an approximation.
#[derive(Debug, Clone)]
pub struct Tween<T> {
    from: T,
    to: T,
    duration: f32,
    easing: Easing,
    elapsed: f32,
}

impl<T: Lerp> Tween<T> {
    pub fn new(from: T, to: T, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration: duration.as_secs_f32(),
            easing,
            elapsed: 0.0,
        }
    }

    /// Linear progress in `[0, 1]`. A zero-length tween is always complete.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn value(&self) -> T {
        let p = self.progress();
        if p >= 1.0 {
            self.to
        } else {
            self.from.lerp(self.to, self.easing.apply(p))
        }
    }

    /// Step the clock by `dt` seconds and return the new value.
    pub fn advance(&mut self, dt: f32) -> T {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        self.value()
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    pub fn from(&self) -> T {
        self.from
    }

    pub fn to(&self) -> T {
        self.to
    }
}
