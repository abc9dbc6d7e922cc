//! Callback-driven fades on top of [`Tween`].
//!
//! `Animator::animate` runs a timed fade from the frame loop:
//! each [`Animator::tick`] pushes the interpolated value into `on_tick`, and
//! `on_complete` runs exactly once when the fade lands. Cancelling a fade
//! drops both callbacks without calling them.

use std::time::Duration;

use super::easing::Easing;
use super::tween::{Lerp, Tween};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationId(u64);

trait Job {
    /// Returns `true` once the job is finished and should be dropped.
    fn step(&mut self, dt: f32) -> bool;
}

struct Fade<T, F, C> {
    tween: Tween<T>,
    on_tick: F,
    on_complete: Option<C>,
}

impl<T, F, C> Job for Fade<T, F, C>
where
    T: Lerp,
    F: FnMut(T),
    C: FnOnce(),
{
    fn step(&mut self, dt: f32) -> bool {
        let value = self.tween.advance(dt);
        (self.on_tick)(value);
        if self.tween.is_finished() {
            if let Some(done) = self.on_complete.take() {
                done();
            }
            return true;
        }
        false
    }
}

/// Owns every running fade. Single-threaded; callbacks may capture `Rc`.
#[derive(Default)]
pub struct Animator {
    next_id: u64,
    jobs: Vec<(AnimationId, Box<dyn Job>)>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fade. Callbacks cannot borrow the animator itself, so chained
    /// animations go through shared state read on the next frame.
    pub fn animate<T, F, C>(
        &mut self,
        from: T,
        to: T,
        duration: Duration,
        easing: Easing,
        on_tick: F,
        on_complete: C,
    ) -> AnimationId
    where
        T: Lerp + 'static,
        F: FnMut(T) + 'static,
        C: FnOnce() + 'static,
    {
        let id = AnimationId(self.next_id);
        self.next_id += 1;
        let job = Fade {
            tween: Tween::new(from, to, duration, easing),
            on_tick,
            on_complete: Some(on_complete),
        };
        self.jobs.push((id, Box::new(job)));
        id
    }

    /// Abandon a fade. Returns `false` if it already finished or never existed.
    pub fn cancel(&mut self, id: AnimationId) -> bool {
        let before = self.jobs.len();
        self.jobs.retain(|(job_id, _)| *job_id != id);
        self.jobs.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.jobs.clear();
    }

    pub fn tick(&mut self, dt: f32) {
        self.jobs.retain_mut(|(_, job)| !job.step(dt));
    }

    pub fn is_running(&self, id: AnimationId) -> bool {
        self.jobs.iter().any(|(job_id, _)| *job_id == id)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[test]
    fn test_completion_fires_exactly_once() {
        let mut animator = Animator::new();
        let value = Rc::new(Cell::new(0.0f32));
        let done = Rc::new(Cell::new(0u32));

        let (v, d) = (value.clone(), done.clone());
        animator.animate(
            0.0f32,
            1.0,
            Duration::from_millis(100),
            Easing::Linear,
            move |x| v.set(x),
            move || d.set(d.get() + 1),
        );

        for _ in 0..20 {
            animator.tick(0.016);
        }
        assert_eq!(value.get(), 1.0);
        assert_eq!(done.get(), 1);
        assert!(animator.is_empty());
    }

    #[test]
    fn test_cancel_stops_ticks_and_completion() {
        let mut animator = Animator::new();
        let ticks = Rc::new(Cell::new(0u32));
        let done = Rc::new(Cell::new(false));

        let (t, d) = (ticks.clone(), done.clone());
        let id = animator.animate(
            0.0f32,
            1.0,
            Duration::from_millis(200),
            Easing::EaseInOut,
            move |_| t.set(t.get() + 1),
            move || d.set(true),
        );

        animator.tick(0.05);
        assert_eq!(ticks.get(), 1);
        assert!(animator.cancel(id));
        assert!(!animator.is_running(id));

        animator.tick(1.0);
        assert_eq!(ticks.get(), 1);
        assert!(!done.get());
        assert!(!animator.cancel(id));
    }

    #[test]
    fn test_values_stay_within_bounds() {
        let mut animator = Animator::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        animator.animate(
            2.0f32,
            -1.0,
            Duration::from_millis(300),
            Easing::EaseOut,
            move |x| s.borrow_mut().push(x),
            || {},
        );
        for dt in [0.1, 0.07, 0.2, 0.3] {
            animator.tick(dt);
        }
        let seen = seen.borrow();
        assert!(seen.iter().all(|x| (-1.0..=2.0).contains(x)));
        assert!(seen.windows(2).all(|w| w[1] <= w[0]));
        assert_eq!(*seen.last().unwrap(), -1.0);
    }

    #[test]
    fn test_independent_fades() {
        let mut animator = Animator::new();
        let a = Rc::new(Cell::new(0.0f32));
        let b = Rc::new(Cell::new(0.0f32));
        let (ac, bc) = (a.clone(), b.clone());
        let short = animator.animate(
            0.0f32,
            1.0,
            Duration::from_millis(50),
            Easing::Linear,
            move |x| ac.set(x),
            || {},
        );
        let long = animator.animate(
            0.0f32,
            1.0,
            Duration::from_millis(500),
            Easing::Linear,
            move |x| bc.set(x),
            || {},
        );

        animator.tick(0.1);
        assert!(!animator.is_running(short));
        assert!(animator.is_running(long));
        assert_eq!(a.get(), 1.0);
        assert!(b.get() < 1.0);
        assert_eq!(animator.len(), 1);
    }
}
