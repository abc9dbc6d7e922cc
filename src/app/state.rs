use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use ratatui::layout::{Position, Rect};
use tracing::{debug, info, warn};

use crate::anim::effects::{PressFeedback, Pulse, RunningLights, Spin, TrackBump};
use crate::anim::{secs, Animator};
use crate::app::config::{PlaybackSettings, UserConfig};
use crate::app::keys::KeyConfig;
use crate::audio::{SpectrumSource, VisualizerSampler};
use crate::intro::IntroSequence;
use crate::panel::{PanelTransition, PanelVisibilityController};
use crate::player::{AudioOutput, Clip, PlaybackController, PlayerEvent, Subscription};
use crate::ui::theme::Theme;

/// Seconds a toast stays up.
pub const TOAST_SECONDS: f32 = 2.0;

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    /// Seconds since the toast first appeared.
    pub age: f32,
    /// Age at which it disappears.
    pub deadline: f32,
}

/// Transport buttons on the panel, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Previous,
    PlayPause,
    Stop,
    Next,
    Mute,
}

impl Control {
    pub const ALL: [Control; 5] = [
        Control::Previous,
        Control::PlayPause,
        Control::Stop,
        Control::Next,
        Control::Mute,
    ];

    pub fn index(self) -> usize {
        match self {
            Control::Previous => 0,
            Control::PlayPause => 1,
            Control::Stop => 2,
            Control::Next => 3,
            Control::Mute => 4,
        }
    }
}

/// Screen regions recorded by the last render, used for mouse hit-testing.
/// Everything is empty while the panel is closed.
#[derive(Debug, Clone, Copy, Default)]
pub struct HitAreas {
    pub panel: Rect,
    pub controls: [Rect; 5],
    pub progress: Rect,
    pub volume: Rect,
    pub mini_bar: Rect,
}

impl HitAreas {
    pub fn control_at(&self, x: u16, y: u16) -> Option<Control> {
        Control::ALL
            .into_iter()
            .find(|c| self.controls[c.index()].contains(Position::new(x, y)))
    }
}

/// Fraction of `area`'s width at column `x`, clamped to `[0, 1]`.
pub fn ratio_in(area: Rect, x: u16) -> f32 {
    if area.width <= 1 {
        return 0.0;
    }
    let offset = x.saturating_sub(area.x).min(area.width - 1);
    offset as f32 / (area.width - 1) as f32
}

pub struct App {
    pub is_running: bool,
    pub keys: KeyConfig,
    pub theme: Theme,
    pub player: PlaybackController,
    pub panel: PanelVisibilityController,
    pub visualizer: VisualizerSampler,
    spectrum: Box<dyn SpectrumSource>,
    pub intro: IntroSequence,
    intro_voice: Option<Box<dyn AudioOutput>>,

    pub animator: Animator,
    pub pulse: Pulse,
    pub spin: Spin,
    pub lights: RunningLights,
    pub presses: [PressFeedback; 5],
    pub bump: TrackBump,

    pub toast: Option<Toast>,
    pub show_keyhints: bool,
    pub hits: HitAreas,
    /// Progress bar position while the user drags it.
    pub scrub: Option<f32>,

    playback: PlaybackSettings,
    autoplay_in: Option<f32>,
    track_changed: Rc<Cell<Option<usize>>>,
    mute_changed: Rc<Cell<Option<bool>>>,
    _subscriptions: Vec<Subscription>,
}

impl App {
    pub fn new(
        config: &UserConfig,
        player: PlaybackController,
        spectrum: Box<dyn SpectrumSource>,
    ) -> Self {
        let track_changed = Rc::new(Cell::new(None));
        let mute_changed = Rc::new(Cell::new(None));

        let subscriptions = {
            let track_changed = Rc::clone(&track_changed);
            let mute_changed = Rc::clone(&mute_changed);
            vec![
                player.events().subscribe(move |event| {
                    if let PlayerEvent::TrackChanged(index) = event {
                        track_changed.set(Some(*index));
                    }
                }),
                player.events().subscribe(move |event| {
                    if let PlayerEvent::MuteChanged(muted) = event {
                        mute_changed.set(Some(*muted));
                    }
                }),
            ]
        };

        let effects = &config.effects;
        let autoplay_in = (config.playback.autoplay && !player.playlist().is_empty())
            .then_some(config.playback.autoplay_delay_seconds);

        Self {
            is_running: true,
            keys: config.keys.clone(),
            theme: config.theme.clone(),
            player,
            panel: PanelVisibilityController::new(config.panel),
            visualizer: VisualizerSampler::new(config.visualizer.clone()),
            spectrum,
            intro: IntroSequence::new(config.intro.clone()),
            intro_voice: None,

            animator: Animator::new(),
            pulse: Pulse::new(secs(effects.pulse_interval_seconds), effects.pulse_speed)
                .with_scale(
                    effects.pulse_min_scale,
                    effects.pulse_max_scale,
                    effects.pulse_intensity,
                ),
            spin: Spin::new(effects.spin_speed),
            lights: RunningLights::new(effects.light_count, effects.light_speed),
            presses: Default::default(),
            bump: TrackBump::default(),

            toast: None,
            show_keyhints: false,
            hits: HitAreas::default(),
            scrub: None,

            playback: config.playback.clone(),
            autoplay_in,
            track_changed,
            mute_changed,
            _subscriptions: subscriptions,
        }
    }

    /// Play `clip` on `voice` for as long as the intro card is up.
    pub fn attach_intro_voice(&mut self, mut voice: Box<dyn AudioOutput>, clip: &Clip) {
        if self.intro.is_done() {
            return;
        }
        let started = voice
            .load(clip)
            .and_then(|()| voice.start(Duration::ZERO));
        match started {
            Ok(()) => {
                info!(clip = %clip.name, "intro clip playing");
                self.intro_voice = Some(voice);
            }
            Err(e) => warn!(clip = %clip.name, error = %e, "intro clip unavailable"),
        }
    }

    pub fn show_toast(&mut self, message: &str) {
        if let Some(ref mut current) = self.toast {
            // Keep the age so a rapid update doesn't replay the entrance
            current.message = message.to_string();
            current.deadline = current.age + TOAST_SECONDS;
        } else {
            self.toast = Some(Toast {
                message: message.to_string(),
                age: 0.0,
                deadline: TOAST_SECONDS,
            });
        }
    }

    pub fn in_intro(&self) -> bool {
        !self.intro.is_done()
    }

    pub fn skip_intro(&mut self) {
        self.intro.skip();
        if self.intro.is_done() {
            self.finish_intro();
        }
    }

    fn finish_intro(&mut self) {
        if let Some(mut voice) = self.intro_voice.take() {
            voice.stop();
        }
        debug!("main screen");
    }

    pub fn toggle_panel(&mut self) {
        if !self.panel.toggle() {
            debug!(state = ?self.panel.state(), "panel busy, toggle ignored");
        }
    }

    pub fn close_panel(&mut self) {
        if !self.panel.close() {
            self.panel.cancel();
        }
    }

    /// A transport button was clicked or its key pressed.
    pub fn activate(&mut self, control: Control) {
        self.presses[control.index()].press(&mut self.animator);
        match control {
            Control::Previous => self.player.previous(),
            Control::Next => self.player.next(),
            Control::PlayPause => {
                self.player.play_pause();
                if self.player.current_clip().is_some() {
                    let label = if self.player.is_playing() { "▶ Play" } else { "⏸ Pause" };
                    self.show_toast(label);
                }
            }
            Control::Stop => {
                self.player.stop();
                self.visualizer.reset();
            }
            Control::Mute => self.player.toggle_mute(),
        }
    }

    pub fn seek_step(&mut self, forward: bool) {
        let step = self.playback.seek_step_seconds;
        self.player.seek_by(if forward { step } else { -step });
        let label = self.player.elapsed_label();
        self.show_toast(&format!("{} {}", if forward { "⏩" } else { "⏪" }, label));
    }

    pub fn volume_step(&mut self, up: bool) {
        if self.player.is_muted() {
            self.show_toast("🔇 Muted");
            return;
        }
        let step = self.playback.volume_step;
        let target = self.player.volume() + if up { step } else { -step };
        self.set_volume(target);
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.player.set_volume(volume);
        if !self.player.is_muted() {
            let percent = (self.player.volume() * 100.0).round() as u32;
            self.show_toast(&format!("🔊 Volume: {}%", percent));
        }
    }

    pub fn begin_scrub(&mut self, ratio: f32) {
        self.player.begin_drag();
        self.scrub = Some(ratio.clamp(0.0, 1.0));
    }

    pub fn scrub_to(&mut self, ratio: f32) {
        if self.scrub.is_some() {
            self.scrub = Some(ratio.clamp(0.0, 1.0));
        }
    }

    /// Release the progress bar: unlock, then seek to where it was let go.
    pub fn end_scrub(&mut self) {
        let Some(ratio) = self.scrub.take() else {
            return;
        };
        self.player.end_drag();
        if let Some(length) = self.player.length() {
            self.player.seek(ratio * length);
        }
    }

    /// Progress bar fill: the scrub position while dragging, else playback.
    pub fn progress_display(&self) -> f32 {
        self.scrub.unwrap_or_else(|| self.player.progress())
    }

    pub fn set_hover(&mut self, x: u16, y: u16) {
        let hovered = self.panel.is_visible() && self.hits.panel.contains(Position::new(x, y));
        self.lights.set_hovered(hovered);
    }

    /// Called every tick with the seconds since the previous one.
    pub fn on_tick(&mut self, dt: f32) {
        if let Some(ref mut toast) = self.toast {
            toast.age += dt.max(0.0);
            if toast.age >= toast.deadline {
                self.toast = None;
            }
        }

        if self.in_intro() {
            if self.intro.update(dt) {
                self.finish_intro();
            }
            return;
        }

        if let Some(remaining) = self.autoplay_in.as_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.autoplay_in = None;
                self.player.play();
            }
        }

        self.player.update(dt);

        if let Some(index) = self.track_changed.take() {
            self.bump.trigger(&mut self.animator);
            self.visualizer.reset();
            let name = self
                .player
                .playlist()
                .get(index)
                .map(|c| c.name.clone())
                .unwrap_or_default();
            self.show_toast(&format!("♪ {}", name));
        }
        if let Some(muted) = self.mute_changed.take() {
            self.show_toast(if muted { "🔇 Muted" } else { "🔊 Unmuted" });
        }

        if let Some(PanelTransition::Closed) = self.panel.update(dt) {
            self.lights.set_hovered(false);
            self.hits = HitAreas::default();
        }

        self.animator.tick(dt);
        self.pulse.update(dt);
        self.spin.update(dt, self.player.is_playing());
        self.lights.update(dt);

        if self.player.is_playing() && self.panel.is_visible() {
            self.visualizer.update(self.spectrum.as_mut(), dt);
        }
    }
}
