//! Open/close animation driver for the player panel.
//!
//! The panel scales and fades in from nothing when opened and back out when
//! closed. While a transition is running, further open/close/toggle
//! requests are ignored; only [`PanelVisibilityController::cancel`] can
//! interrupt it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::anim::{secs, Easing, Tween};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelSettings {
    /// Seconds to fully open.
    pub open_seconds: f32,
    /// Seconds to fully close.
    pub close_seconds: f32,
    pub easing: Easing,
    /// Scale of the panel at rest when open.
    pub natural_scale: f32,
    pub start_open: bool,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            open_seconds: 0.3,
            close_seconds: 0.2,
            easing: Easing::EaseInOut,
            natural_scale: 1.0,
            start_open: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PanelState {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl PanelState {
    pub fn is_terminal(self) -> bool {
        matches!(self, PanelState::Open | PanelState::Closed)
    }
}

/// A transition that finished during [`PanelVisibilityController::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelTransition {
    Opened,
    Closed,
}

#[derive(Debug, Clone)]
pub struct PanelVisibilityController {
    settings: PanelSettings,
    state: PanelState,
    /// (scale, alpha)
    tween: Option<Tween<(f32, f32)>>,
    scale: f32,
    alpha: f32,
}

impl PanelVisibilityController {
    pub fn new(settings: PanelSettings) -> Self {
        let mut panel = Self {
            settings,
            state: PanelState::Closed,
            tween: None,
            scale: 0.0,
            alpha: 0.0,
        };
        if settings.start_open {
            panel.snap(PanelState::Open);
        }
        panel
    }

    pub fn settings(&self) -> &PanelSettings {
        &self.settings
    }

    /// Start opening. Returns `false` when the panel is not closed.
    pub fn open(&mut self) -> bool {
        if self.state != PanelState::Closed {
            return false;
        }
        self.state = PanelState::Opening;
        self.tween = Some(Tween::new(
            (0.0, 0.0),
            (self.settings.natural_scale, 1.0),
            secs(self.settings.open_seconds),
            self.settings.easing,
        ));
        debug!("panel opening");
        true
    }

    /// Start closing. Returns `false` when the panel is not open.
    pub fn close(&mut self) -> bool {
        if self.state != PanelState::Open {
            return false;
        }
        self.state = PanelState::Closing;
        self.tween = Some(Tween::new(
            (self.scale, self.alpha),
            (0.0, 0.0),
            secs(self.settings.close_seconds),
            self.settings.easing,
        ));
        debug!("panel closing");
        true
    }

    pub fn toggle(&mut self) -> bool {
        match self.state {
            PanelState::Closed => self.open(),
            PanelState::Open => self.close(),
            PanelState::Opening | PanelState::Closing => false,
        }
    }

    /// Abandon a running transition and return to the state it started
    /// from. Returns `false` when nothing was running.
    pub fn cancel(&mut self) -> bool {
        match self.state {
            PanelState::Opening => self.snap(PanelState::Closed),
            PanelState::Closing => self.snap(PanelState::Open),
            PanelState::Open | PanelState::Closed => return false,
        }
        debug!(state = ?self.state, "panel transition cancelled");
        true
    }

    pub fn update(&mut self, dt: f32) -> Option<PanelTransition> {
        let tween = self.tween.as_mut()?;
        let (scale, alpha) = tween.advance(dt);
        self.scale = scale;
        self.alpha = alpha;
        if !tween.is_finished() {
            return None;
        }

        self.tween = None;
        match self.state {
            PanelState::Opening => {
                self.state = PanelState::Open;
                Some(PanelTransition::Opened)
            }
            PanelState::Closing => {
                self.state = PanelState::Closed;
                Some(PanelTransition::Closed)
            }
            PanelState::Open | PanelState::Closed => None,
        }
    }

    fn snap(&mut self, state: PanelState) {
        self.tween = None;
        self.state = state;
        if state == PanelState::Open {
            self.scale = self.settings.natural_scale;
            self.alpha = 1.0;
        } else {
            self.scale = 0.0;
            self.alpha = 0.0;
        }
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    /// Rendered and hit-testable. A closed panel is neither.
    pub fn is_visible(&self) -> bool {
        self.state != PanelState::Closed
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }
}

impl Default for PanelVisibilityController {
    fn default() -> Self {
        Self::new(PanelSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(panel: &mut PanelVisibilityController, frames: usize, dt: f32) -> Vec<PanelTransition> {
        (0..frames).filter_map(|_| panel.update(dt)).collect()
    }

    #[test]
    fn test_open_runs_to_completion() {
        let mut panel = PanelVisibilityController::default();
        assert!(!panel.is_visible());
        assert!(panel.open());
        assert_eq!(panel.state(), PanelState::Opening);
        assert!(panel.is_visible());

        panel.update(0.15);
        assert!(panel.alpha() > 0.0 && panel.alpha() < 1.0);
        assert!(panel.scale() > 0.0 && panel.scale() < 1.0);

        assert_eq!(panel.update(0.2), Some(PanelTransition::Opened));
        assert_eq!(panel.state(), PanelState::Open);
        assert_eq!(panel.alpha(), 1.0);
        assert_eq!(panel.scale(), 1.0);
        assert!(!panel.is_animating());
    }

    #[test]
    fn test_close_deactivates() {
        let mut panel = PanelVisibilityController::new(PanelSettings {
            start_open: true,
            ..Default::default()
        });
        assert_eq!(panel.state(), PanelState::Open);
        assert!(panel.close());
        let done = run(&mut panel, 20, 1.0 / 60.0);
        assert_eq!(done, vec![PanelTransition::Closed]);
        assert!(!panel.is_visible());
        assert_eq!(panel.alpha(), 0.0);
        assert_eq!(panel.scale(), 0.0);
    }

    #[test]
    fn test_toggle_ignored_mid_transition() {
        let mut panel = PanelVisibilityController::default();
        assert!(panel.toggle());
        panel.update(0.05);
        assert!(!panel.toggle());
        assert!(!panel.close());
        assert!(!panel.open());
        assert_eq!(panel.state(), PanelState::Opening);

        run(&mut panel, 30, 1.0 / 60.0);
        assert_eq!(panel.state(), PanelState::Open);
        assert!(panel.toggle());
        assert_eq!(panel.state(), PanelState::Closing);
    }

    #[test]
    fn test_cancel_snaps_back() {
        let mut panel = PanelVisibilityController::default();
        panel.open();
        panel.update(0.1);
        assert!(panel.cancel());
        assert_eq!(panel.state(), PanelState::Closed);
        assert_eq!(panel.alpha(), 0.0);
        assert_eq!(panel.update(1.0), None);

        panel.open();
        panel.update(1.0);
        panel.close();
        panel.update(0.05);
        assert!(panel.cancel());
        assert_eq!(panel.state(), PanelState::Open);
        assert_eq!(panel.alpha(), 1.0);
        assert!(!panel.cancel());
    }

    #[test]
    fn test_zero_duration_completes_on_first_frame() {
        let mut panel = PanelVisibilityController::new(PanelSettings {
            open_seconds: 0.0,
            natural_scale: 0.9,
            ..Default::default()
        });
        panel.open();
        assert_eq!(panel.update(0.0), Some(PanelTransition::Opened));
        assert_eq!(panel.scale(), 0.9);
    }

    #[test]
    fn test_alpha_never_overshoots() {
        let mut panel = PanelVisibilityController::default();
        panel.open();
        let mut last = 0.0;
        for _ in 0..40 {
            panel.update(1.0 / 60.0);
            assert!(panel.alpha() >= last && panel.alpha() <= 1.0);
            last = panel.alpha();
        }
    }
}
