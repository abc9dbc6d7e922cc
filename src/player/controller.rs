use std::time::Duration;

use tracing::{debug, info, warn};

use super::observer::{EventBus, PlayerEvent};
use super::playlist::{Clip, Playlist};
use super::traits::{AudioOutput, PlayerState};

/// Volume applied at start-up and whenever mute is switched off.
pub const DEFAULT_VOLUME: f32 = 0.5;

/// A track counts as finished this close to its end.
pub const END_EPSILON: f32 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub track_index: usize,
    pub status: PlayerState,
    /// Seconds into the current clip.
    pub elapsed: f32,
    /// Slider volume. The output hears `0.0` instead while muted.
    pub volume: f32,
    pub muted: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            track_index: 0,
            status: PlayerState::Stopped,
            elapsed: 0.0,
            volume: DEFAULT_VOLUME,
            muted: false,
        }
    }
}

/// Transport, volume and track selection over an [`AudioOutput`].
///
/// The controller owns the playback clock: `update(dt)` advances it once
/// per frame and detects the end of a track.
pub struct PlaybackController {
    playlist: Playlist,
    output: Box<dyn AudioOutput>,
    state: PlaybackState,
    loaded: bool,
    // Seek while paused: the paused voice is stale, restart on play.
    restart_on_play: bool,
    drag_lock: bool,
    events: EventBus,
}

impl PlaybackController {
    pub fn new(playlist: Playlist, output: Box<dyn AudioOutput>) -> Self {
        let mut controller = Self {
            playlist,
            output,
            state: PlaybackState::default(),
            loaded: false,
            restart_on_play: false,
            drag_lock: false,
            events: EventBus::new(),
        };
        controller.output.set_volume(DEFAULT_VOLUME);
        if !controller.playlist.is_empty() {
            controller.load_current();
        }
        controller
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    fn load_current(&mut self) {
        self.state.elapsed = 0.0;
        self.restart_on_play = false;
        let Some(clip) = self.playlist.get(self.state.track_index) else {
            self.loaded = false;
            return;
        };
        match self.output.load(clip) {
            Ok(()) => {
                debug!(index = self.state.track_index, clip = %clip.name, "clip loaded");
                self.loaded = true;
            }
            Err(e) => {
                warn!(clip = %clip.name, error = %e, "failed to load clip");
                self.loaded = false;
            }
        }
    }

    pub fn play(&mut self) {
        if self.playlist.is_empty() {
            debug!("play ignored: empty playlist");
            return;
        }
        if self.state.status == PlayerState::Playing {
            return;
        }
        if !self.loaded {
            self.load_current();
            if !self.loaded {
                return;
            }
        }

        let result = if self.state.status == PlayerState::Paused && !self.restart_on_play {
            self.output.resume()
        } else {
            self.output
                .start(Duration::from_secs_f32(self.state.elapsed.max(0.0)))
        };

        match result {
            Ok(()) => {
                self.state.status = PlayerState::Playing;
                self.restart_on_play = false;
            }
            Err(e) => warn!(error = %e, "play failed"),
        }
    }

    pub fn pause(&mut self) {
        if self.state.status != PlayerState::Playing {
            return;
        }
        self.output.pause();
        self.state.status = PlayerState::Paused;
    }

    pub fn stop(&mut self) {
        if self.playlist.is_empty() {
            return;
        }
        self.output.stop();
        self.state.status = PlayerState::Stopped;
        self.state.elapsed = 0.0;
        self.restart_on_play = false;
    }

    /// Play if stopped or paused, pause if playing.
    pub fn play_pause(&mut self) {
        if self.state.status == PlayerState::Playing {
            self.pause();
        } else {
            self.play();
        }
    }

    pub fn next(&mut self) {
        if let Some(index) = self.playlist.next_index(self.state.track_index) {
            self.switch_to(index);
        }
    }

    pub fn previous(&mut self) {
        if let Some(index) = self.playlist.prev_index(self.state.track_index) {
            self.switch_to(index);
        }
    }

    fn switch_to(&mut self, index: usize) {
        let was_playing = self.state.status == PlayerState::Playing;
        self.output.stop();
        self.state.status = PlayerState::Stopped;
        self.state.track_index = index;
        self.load_current();

        if was_playing {
            self.play();
        }
        self.events.emit(PlayerEvent::TrackChanged(index));
    }

    /// Jump to `seconds`, clamped to the clip. Ignored while the progress
    /// bar is being dragged.
    pub fn seek(&mut self, seconds: f32) {
        if self.drag_lock {
            debug!("seek ignored: drag in progress");
            return;
        }
        let Some(length) = self.length() else {
            return;
        };
        let target = if seconds.is_nan() {
            0.0
        } else {
            seconds.clamp(0.0, length)
        };

        match self.state.status {
            PlayerState::Playing => {
                if let Err(e) = self.output.start(Duration::from_secs_f32(target)) {
                    warn!(error = %e, "seek failed");
                    return;
                }
            }
            PlayerState::Paused => self.restart_on_play = true,
            PlayerState::Stopped => {}
        }
        self.state.elapsed = target;
    }

    /// Seek relative to the current position.
    pub fn seek_by(&mut self, delta: f32) {
        self.seek(self.state.elapsed + delta);
    }

    pub fn begin_drag(&mut self) {
        self.drag_lock = true;
    }

    pub fn end_drag(&mut self) {
        self.drag_lock = false;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_lock
    }

    /// Slider volume in `[0, 1]`. Has no effect while muted.
    pub fn set_volume(&mut self, volume: f32) {
        if self.state.muted || volume.is_nan() {
            return;
        }
        let volume = volume.clamp(0.0, 1.0);
        self.state.volume = volume;
        self.output.set_volume(volume);
        debug!(volume, "volume set");
    }

    /// Mute forces the output to silence. Unmute restores
    /// [`DEFAULT_VOLUME`], not the level from before the mute.
    pub fn toggle_mute(&mut self) {
        self.state.muted = !self.state.muted;
        if self.state.muted {
            self.output.set_volume(0.0);
        } else {
            self.state.volume = DEFAULT_VOLUME;
            self.output.set_volume(DEFAULT_VOLUME);
        }
        info!(muted = self.state.muted, "mute toggled");
        self.events.emit(PlayerEvent::MuteChanged(self.state.muted));
    }

    /// Per-frame clock. Advances to the next track once the current one is
    /// within [`END_EPSILON`] of its end, or as soon as the output runs dry.
    pub fn update(&mut self, dt: f32) {
        if self.state.status != PlayerState::Playing || !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let Some(length) = self.length() else {
            return;
        };

        self.state.elapsed = (self.state.elapsed + dt).min(length);
        let ended = self.output.is_drained()
            || (length > 0.0 && self.state.elapsed >= length - END_EPSILON);

        if ended {
            info!(index = self.state.track_index, "track finished");
            self.next();
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn status(&self) -> PlayerState {
        self.state.status
    }

    pub fn is_playing(&self) -> bool {
        self.state.status == PlayerState::Playing
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn track_index(&self) -> usize {
        self.state.track_index
    }

    pub fn current_clip(&self) -> Option<&Clip> {
        self.playlist.get(self.state.track_index)
    }

    pub fn elapsed(&self) -> f32 {
        self.state.elapsed
    }

    /// Length of the current clip in seconds.
    pub fn length(&self) -> Option<f32> {
        self.current_clip().map(|c| c.length.as_secs_f32())
    }

    pub fn progress(&self) -> f32 {
        match self.length() {
            Some(length) if length > 0.0 => (self.state.elapsed / length).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }

    /// What the output is hearing: `0.0` while muted.
    pub fn volume(&self) -> f32 {
        if self.state.muted {
            0.0
        } else {
            self.state.volume
        }
    }

    pub fn is_muted(&self) -> bool {
        self.state.muted
    }

    /// Next/previous only make sense with more than one clip.
    pub fn can_skip(&self) -> bool {
        self.playlist.len() > 1
    }

    pub fn elapsed_label(&self) -> String {
        format_time(self.state.elapsed)
    }

    pub fn length_label(&self) -> String {
        format_time(self.length().unwrap_or(0.0))
    }
}

/// `mm:ss`, minutes uncapped.
pub fn format_time(seconds: f32) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlayerError;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Load(String),
        Start(u64),
        Resume,
        Pause,
        Stop,
        Volume(f32),
    }

    #[derive(Clone, Default)]
    struct Recorder {
        calls: Rc<RefCell<Vec<Call>>>,
        fail_load: Rc<Cell<bool>>,
        fail_start: Rc<Cell<bool>>,
        drained: Rc<Cell<bool>>,
    }

    impl Recorder {
        fn take(&self) -> Vec<Call> {
            std::mem::take(&mut *self.calls.borrow_mut())
        }
    }

    impl AudioOutput for Recorder {
        fn load(&mut self, clip: &Clip) -> Result<(), PlayerError> {
            if self.fail_load.get() {
                return Err(PlayerError::MissingFile(clip.path.clone()));
            }
            self.calls.borrow_mut().push(Call::Load(clip.name.clone()));
            Ok(())
        }
        fn start(&mut self, position: Duration) -> Result<(), PlayerError> {
            if self.fail_start.get() {
                return Err(PlayerError::Device("unplugged".into()));
            }
            self.calls.borrow_mut().push(Call::Start(position.as_millis() as u64));
            Ok(())
        }
        fn resume(&mut self) -> Result<(), PlayerError> {
            self.calls.borrow_mut().push(Call::Resume);
            Ok(())
        }
        fn pause(&mut self) {
            self.calls.borrow_mut().push(Call::Pause);
        }
        fn stop(&mut self) {
            self.calls.borrow_mut().push(Call::Stop);
        }
        fn set_volume(&mut self, volume: f32) {
            self.calls.borrow_mut().push(Call::Volume(volume));
        }
        fn is_drained(&self) -> bool {
            self.drained.get()
        }
    }

    fn playlist(n: usize) -> Playlist {
        Playlist::new(
            (0..n)
                .map(|i| {
                    Clip::new(
                        format!("t{}", i),
                        format!("/m/t{}.mp3", i),
                        Duration::from_secs(10),
                    )
                })
                .collect(),
        )
    }

    fn controller(n: usize) -> (PlaybackController, Recorder) {
        let rec = Recorder::default();
        let c = PlaybackController::new(playlist(n), Box::new(rec.clone()));
        rec.take();
        (c, rec)
    }

    #[test]
    fn test_next_cycles_back_to_start() {
        for n in 1..=5 {
            let (mut c, _) = controller(n);
            c.next();
            c.next();
            let start = c.track_index();
            for _ in 0..n {
                c.next();
            }
            assert_eq!(c.track_index(), start, "playlist of {}", n);
        }
    }

    #[test]
    fn test_previous_wraps_to_end() {
        let (mut c, _) = controller(4);
        c.previous();
        assert_eq!(c.track_index(), 3);
    }

    #[test]
    fn test_empty_playlist_is_inert() {
        let rec = Recorder::default();
        let mut c = PlaybackController::new(Playlist::default(), Box::new(rec.clone()));
        rec.take();
        c.play();
        c.next();
        c.previous();
        c.seek(3.0);
        c.stop();
        c.update(1.0);
        assert_eq!(c.status(), PlayerState::Stopped);
        assert!(rec.take().is_empty());
        assert!(c.current_clip().is_none());
    }

    #[test]
    fn test_pause_then_play_resumes() {
        let (mut c, rec) = controller(2);
        c.play();
        c.update(2.0);
        c.pause();
        assert_eq!(c.status(), PlayerState::Paused);
        c.play();
        assert_eq!(rec.take(), vec![Call::Start(0), Call::Pause, Call::Resume]);
        assert_eq!(c.elapsed(), 2.0);
    }

    #[test]
    fn test_stop_rewinds() {
        let (mut c, rec) = controller(2);
        c.play();
        c.update(4.0);
        c.stop();
        assert_eq!(c.elapsed(), 0.0);
        c.play();
        assert_eq!(rec.take(), vec![Call::Start(0), Call::Stop, Call::Start(0)]);
    }

    #[test]
    fn test_seek_clamps() {
        let (mut c, _) = controller(1);
        for (input, expected) in [(-5.0, 0.0), (4.5, 4.5), (99.0, 10.0), (f32::NAN, 0.0)] {
            c.seek(input);
            assert_eq!(c.elapsed(), expected, "seek({})", input);
            assert!((0.0..=10.0).contains(&c.elapsed()));
        }
    }

    #[test]
    fn test_seek_ignored_while_dragging() {
        let (mut c, _) = controller(1);
        c.seek(3.0);
        c.begin_drag();
        c.seek(7.0);
        assert_eq!(c.elapsed(), 3.0);
        c.end_drag();
        c.seek(7.0);
        assert_eq!(c.elapsed(), 7.0);
    }

    #[test]
    fn test_seek_while_paused_restarts_on_play() {
        let (mut c, rec) = controller(1);
        c.play();
        c.pause();
        c.seek(6.0);
        c.play();
        assert_eq!(rec.take(), vec![Call::Start(0), Call::Pause, Call::Start(6000)]);
    }

    #[test]
    fn test_failed_seek_keeps_position() {
        let (mut c, rec) = controller(1);
        c.play();
        c.update(2.0);
        rec.take();

        rec.fail_start.set(true);
        c.seek(8.0);
        assert_eq!(c.elapsed(), 2.0);
        assert!(c.is_playing());
        assert!(rec.take().is_empty());

        rec.fail_start.set(false);
        c.seek(8.0);
        assert_eq!(c.elapsed(), 8.0);
        assert_eq!(rec.take(), vec![Call::Start(8000)]);
    }

    #[test]
    fn test_next_keeps_playing_only_if_playing() {
        let (mut c, rec) = controller(3);
        c.next();
        assert_eq!(c.status(), PlayerState::Stopped);
        assert_eq!(rec.take(), vec![Call::Stop, Call::Load("t1".into())]);

        c.play();
        c.update(3.0);
        c.next();
        assert_eq!(c.status(), PlayerState::Playing);
        assert_eq!(c.elapsed(), 0.0);
        assert_eq!(
            rec.take(),
            vec![Call::Start(0), Call::Stop, Call::Load("t2".into()), Call::Start(0)]
        );

        c.pause();
        c.next();
        assert_eq!(c.status(), PlayerState::Stopped);
        assert_eq!(c.track_index(), 0);
    }

    #[test]
    fn test_mute_round_trip_restores_default_volume() {
        let (mut c, rec) = controller(1);
        c.set_volume(0.9);
        c.toggle_mute();
        assert_eq!(c.volume(), 0.0);

        c.set_volume(0.3);
        assert_eq!(c.volume(), 0.0);

        c.toggle_mute();
        assert_eq!(c.volume(), DEFAULT_VOLUME);
        assert_eq!(
            rec.take(),
            vec![Call::Volume(0.9), Call::Volume(0.0), Call::Volume(DEFAULT_VOLUME)]
        );
    }

    #[test]
    fn test_volume_is_clamped() {
        let (mut c, _) = controller(1);
        c.set_volume(1.7);
        assert_eq!(c.volume(), 1.0);
        c.set_volume(-0.2);
        assert_eq!(c.volume(), 0.0);
    }

    #[test]
    fn test_end_of_track_advances() {
        let (mut c, _) = controller(2);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        let _sub = c.events().subscribe(move |e| s.borrow_mut().push(*e));

        c.play();
        for _ in 0..98 {
            c.update(0.1);
        }
        assert_eq!(c.track_index(), 0);
        c.update(0.15);
        assert_eq!(c.track_index(), 1);
        assert!(c.is_playing());
        assert_eq!(*seen.borrow(), vec![PlayerEvent::TrackChanged(1)]);
    }

    #[test]
    fn test_drained_output_ends_track_early() {
        let (mut c, rec) = controller(2);
        c.play();
        c.update(3.0);
        assert_eq!(c.track_index(), 0);

        rec.drained.set(true);
        c.update(0.016);
        assert_eq!(c.track_index(), 1);
        assert_eq!(c.elapsed(), 0.0);
    }

    #[test]
    fn test_mute_event_emitted() {
        let (mut c, _) = controller(1);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        let _sub = c.events().subscribe(move |e| s.borrow_mut().push(*e));
        c.toggle_mute();
        c.toggle_mute();
        assert_eq!(
            *seen.borrow(),
            vec![PlayerEvent::MuteChanged(true), PlayerEvent::MuteChanged(false)]
        );
    }

    #[test]
    fn test_failed_load_is_not_fatal() {
        let rec = Recorder::default();
        rec.fail_load.set(true);
        let mut c = PlaybackController::new(playlist(2), Box::new(rec.clone()));
        c.play();
        assert_eq!(c.status(), PlayerState::Stopped);

        rec.fail_load.set(false);
        c.play();
        assert!(c.is_playing());
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(61.9), "01:01");
        assert_eq!(format_time(3600.0), "60:00");
        assert_eq!(format_time(-4.0), "00:00");
    }
}
