//! Frame-driven animation primitives.
//!
//! Everything here is advanced by an explicit `dt` (seconds since the last
//! frame). Nothing spawns threads or timers; the app's tick loop is the
//! only scheduler.

pub mod animator;
pub mod color;
pub mod easing;
pub mod effects;
pub mod tween;

pub use animator::{AnimationId, Animator};
pub use color::Rgb;
pub use easing::Easing;
pub use tween::{secs, Lerp, Tween};
