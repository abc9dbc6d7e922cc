//! Title card shown before the main screen: fade in, hold, fade out.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::anim::{secs, Easing, Tween};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroSettings {
    pub enabled: bool,
    pub title: String,
    pub subtitle: String,
    pub fade_in_seconds: f32,
    pub hold_seconds: f32,
    pub fade_out_seconds: f32,
    /// Fade-out length when the card is skipped.
    pub skip_fade_seconds: f32,
    /// Audio file under the assets directory played during the card.
    pub clip: Option<String>,
}

impl Default for IntroSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            title: "NEONBOX".to_string(),
            subtitle: "press any key".to_string(),
            fade_in_seconds: 0.6,
            hold_seconds: 1.2,
            fade_out_seconds: 0.6,
            skip_fade_seconds: 0.3,
            clip: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroPhase {
    FadeIn,
    Hold,
    FadeOut,
    Done,
}

#[derive(Debug, Clone)]
pub struct IntroSequence {
    settings: IntroSettings,
    phase: IntroPhase,
    fade: Tween<f32>,
    held: f32,
    elapsed: f32,
    alpha: f32,
}

impl IntroSequence {
    pub fn new(settings: IntroSettings) -> Self {
        let phase = if settings.enabled {
            IntroPhase::FadeIn
        } else {
            IntroPhase::Done
        };
        let fade = Tween::new(0.0, 1.0, secs(settings.fade_in_seconds), Easing::Linear);
        Self {
            settings,
            phase,
            fade,
            held: 0.0,
            elapsed: 0.0,
            alpha: 0.0,
        }
    }

    pub fn settings(&self) -> &IntroSettings {
        &self.settings
    }

    /// Advance by `dt`. Returns `true` on the frame the card finishes.
    pub fn update(&mut self, dt: f32) -> bool {
        if self.phase == IntroPhase::Done {
            return false;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.elapsed += dt;

        match self.phase {
            IntroPhase::FadeIn => {
                self.alpha = self.fade.advance(dt);
                if self.fade.is_finished() {
                    self.phase = IntroPhase::Hold;
                    self.held = 0.0;
                }
            }
            IntroPhase::Hold => {
                self.held += dt;
                if self.held >= self.settings.hold_seconds {
                    self.begin_fade_out(self.settings.fade_out_seconds);
                }
            }
            IntroPhase::FadeOut => {
                self.alpha = self.fade.advance(dt);
                if self.fade.is_finished() {
                    self.phase = IntroPhase::Done;
                    debug!("intro finished");
                    return true;
                }
            }
            IntroPhase::Done => {}
        }
        false
    }

    /// First skip starts a short fade out; a second one ends the card.
    pub fn skip(&mut self) {
        match self.phase {
            IntroPhase::FadeIn | IntroPhase::Hold => {
                debug!("intro skipped");
                self.begin_fade_out(self.settings.skip_fade_seconds);
            }
            IntroPhase::FadeOut => {
                self.alpha = 0.0;
                self.phase = IntroPhase::Done;
            }
            IntroPhase::Done => {}
        }
    }

    fn begin_fade_out(&mut self, seconds: f32) {
        self.phase = IntroPhase::FadeOut;
        self.fade = Tween::new(self.alpha, 0.0, secs(seconds), Easing::Linear);
    }

    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == IntroPhase::Done
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Overall progress through the nominal card length, for the progress
    /// strip.
    pub fn progress(&self) -> f32 {
        if self.is_done() {
            return 1.0;
        }
        let total = self.settings.fade_in_seconds
            + self.settings.hold_seconds
            + self.settings.fade_out_seconds;
        if total <= 0.0 {
            return 1.0;
        }
        (self.elapsed / total).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(intro: &mut IntroSequence, seconds: f32) -> bool {
        let dt = 1.0 / 60.0;
        let mut finished = false;
        let mut t = 0.0;
        while t < seconds {
            finished |= intro.update(dt);
            t += dt;
        }
        finished
    }

    #[test]
    fn test_full_sequence() {
        let mut intro = IntroSequence::new(IntroSettings::default());
        assert_eq!(intro.phase(), IntroPhase::FadeIn);

        frames(&mut intro, 0.3);
        assert!(intro.alpha() > 0.3 && intro.alpha() < 0.7);

        frames(&mut intro, 0.4);
        assert_eq!(intro.phase(), IntroPhase::Hold);
        assert_eq!(intro.alpha(), 1.0);

        assert!(frames(&mut intro, 2.0));
        assert!(intro.is_done());
        assert_eq!(intro.alpha(), 0.0);
        assert_eq!(intro.progress(), 1.0);
        assert!(!intro.update(0.1));
    }

    #[test]
    fn test_skip_fades_quickly() {
        let mut intro = IntroSequence::new(IntroSettings::default());
        frames(&mut intro, 0.8);
        intro.skip();
        assert_eq!(intro.phase(), IntroPhase::FadeOut);
        assert!(frames(&mut intro, 0.35));
        assert!(intro.is_done());
    }

    #[test]
    fn test_second_skip_ends_immediately() {
        let mut intro = IntroSequence::new(IntroSettings::default());
        intro.update(0.1);
        intro.skip();
        intro.skip();
        assert!(intro.is_done());
        assert_eq!(intro.alpha(), 0.0);
    }

    #[test]
    fn test_disabled_starts_done() {
        let intro = IntroSequence::new(IntroSettings {
            enabled: false,
            ..Default::default()
        });
        assert!(intro.is_done());
    }
}
