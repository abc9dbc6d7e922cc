use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::app::state::{ratio_in, App, Control};

pub fn handle_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        _ => {}
    }
}

pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Any key skips the intro; quit still quits.
    if app.in_intro() {
        if app.keys.matches(key, &app.keys.quit) {
            app.is_running = false;
        } else {
            app.skip_intro();
        }
        return;
    }

    let keys = app.keys.clone();

    // Quit ('q'): close popups first
    if keys.matches(key, &keys.quit) {
        if app.show_keyhints {
            app.show_keyhints = false;
        } else {
            app.is_running = false;
        }
        return;
    }

    if keys.matches(key, &keys.toggle_keyhints) {
        app.show_keyhints = !app.show_keyhints;
        return;
    }

    if keys.matches(key, &keys.toggle_panel) {
        app.toggle_panel();
        return;
    }

    if keys.matches(key, &keys.close_panel) {
        if app.show_keyhints {
            app.show_keyhints = false;
        } else {
            app.close_panel();
        }
        return;
    }

    if keys.matches(key, &keys.play_pause) {
        app.activate(Control::PlayPause);
        return;
    }

    if keys.matches(key, &keys.stop) {
        app.activate(Control::Stop);
        app.show_toast("⏹ Stop");
        return;
    }

    if keys.matches(key, &keys.next_track) {
        app.activate(Control::Next);
        return;
    }

    if keys.matches(key, &keys.prev_track) {
        app.activate(Control::Previous);
        return;
    }

    if keys.matches(key, &keys.mute) {
        app.activate(Control::Mute);
        return;
    }

    if keys.matches(key, &keys.seek_forward) || keys.matches(key, &keys.seek_forward_alt) {
        app.seek_step(true);
        return;
    }

    if keys.matches(key, &keys.seek_backward) || keys.matches(key, &keys.seek_backward_alt) {
        app.seek_step(false);
        return;
    }

    if keys.matches(key, &keys.volume_up) {
        app.volume_step(true);
        return;
    }

    if keys.matches(key, &keys.volume_down) {
        app.volume_step(false);
    }
}

pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let (x, y) = (mouse.column, mouse.row);

    if app.in_intro() {
        if let MouseEventKind::Down(_) = mouse.kind {
            app.skip_intro();
        }
        return;
    }

    match mouse.kind {
        MouseEventKind::Moved => app.set_hover(x, y),
        MouseEventKind::Down(MouseButton::Left) => {
            let hits = app.hits;
            let at = Position::new(x, y);

            if app.panel.is_visible() {
                if let Some(control) = hits.control_at(x, y) {
                    app.activate(control);
                } else if hits.progress.contains(at) {
                    app.begin_scrub(ratio_in(hits.progress, x));
                } else if hits.volume.contains(at) {
                    app.set_volume(ratio_in(hits.volume, x));
                }
            } else if hits.mini_bar.contains(at) {
                app.toggle_panel();
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            let hits = app.hits;
            if app.scrub.is_some() {
                app.scrub_to(ratio_in(hits.progress, x));
            } else if hits.volume.contains(Position::new(x, y)) {
                app.set_volume(ratio_in(hits.volume, x));
            }
        }
        MouseEventKind::Up(MouseButton::Left) => app.end_scrub(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::UserConfig;
    use crate::audio::SpectrumSource;
    use crate::panel::PanelState;
    use crate::player::{Clip, NullOutput, PlaybackController, Playlist};
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::layout::Rect;
    use std::time::Duration;

    struct Silent;

    impl SpectrumSource for Silent {
        fn amplitudes(&mut self, buckets: usize) -> Vec<f32> {
            vec![0.0; buckets]
        }
    }

    fn app() -> App {
        let clips = (0..3)
            .map(|i| {
                Clip::new(
                    format!("Track {}", i),
                    format!("/tmp/{}.wav", i),
                    Duration::from_secs(20),
                )
            })
            .collect();
        let mut config = UserConfig::default();
        config.intro.enabled = false;
        config.playback.autoplay = false;
        let player = PlaybackController::new(Playlist::new(clips), Box::new(NullOutput::default()));
        App::new(&config, player, Box::new(Silent))
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn mouse(app: &mut App, kind: MouseEventKind, column: u16, row: u16) {
        handle_mouse(
            app,
            MouseEvent {
                kind,
                column,
                row,
                modifiers: KeyModifiers::NONE,
            },
        );
    }

    fn open_panel(app: &mut App) {
        app.toggle_panel();
        for _ in 0..30 {
            app.on_tick(1.0 / 60.0);
        }
        app.hits.panel = Rect::new(0, 0, 40, 12);
        app.hits.progress = Rect::new(5, 5, 21, 1);
        app.hits.volume = Rect::new(5, 9, 11, 1);
        app.hits.controls[Control::PlayPause.index()] = Rect::new(10, 7, 3, 1);
    }

    #[test]
    fn test_m_toggles_panel() {
        let mut app = app();
        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.panel.state(), PanelState::Opening);
        // Mid-animation toggles are ignored
        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.panel.state(), PanelState::Opening);
    }

    #[test]
    fn test_transport_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char(' '));
        assert!(app.player.is_playing());
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.player.track_index(), 1);
        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.player.track_index(), 2);
        press(&mut app, KeyCode::Char('x'));
        assert!(app.player.is_muted());
        assert_eq!(app.player.volume(), 0.0);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.is_running);
    }

    #[test]
    fn test_click_play_button() {
        let mut app = app();
        open_panel(&mut app);
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 11, 7);
        assert!(app.player.is_playing());
        assert_eq!(app.presses[Control::PlayPause.index()].level(), 1.0);
    }

    #[test]
    fn test_progress_drag_locks_until_release() {
        let mut app = app();
        open_panel(&mut app);
        press(&mut app, KeyCode::Char(' '));

        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 5, 5);
        assert!(app.player.is_dragging());
        mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), 15, 5);
        assert_eq!(app.progress_display(), 0.5);
        mouse(&mut app, MouseEventKind::Up(MouseButton::Left), 15, 5);
        assert!(!app.player.is_dragging());
        assert!((app.player.elapsed() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_volume_click() {
        let mut app = app();
        open_panel(&mut app);
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 15, 9);
        assert!((app.player.volume() - 1.0).abs() < 1e-6);
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 5, 9);
        assert_eq!(app.player.volume(), 0.0);
    }

    #[test]
    fn test_clicks_ignored_when_closed() {
        let mut app = app();
        app.hits.controls[Control::PlayPause.index()] = Rect::new(10, 7, 3, 1);
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 11, 7);
        assert!(!app.player.is_playing());
    }

    #[test]
    fn test_hover_shows_lights() {
        let mut app = app();
        open_panel(&mut app);
        mouse(&mut app, MouseEventKind::Moved, 3, 3);
        assert!(app.lights.is_visible());
        mouse(&mut app, MouseEventKind::Moved, 60, 30);
        assert!(!app.lights.is_visible());
    }
}
