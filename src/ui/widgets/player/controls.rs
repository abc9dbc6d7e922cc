use crate::app::{App, Control};
use crate::player::PlayerState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    layout::Alignment,
    Frame,
};

/// Width of one button cell.
const BUTTON_WIDTH: u16 = 5;

pub fn render(f: &mut Frame, area: Rect, app: &mut App, alpha: f32) {
    if area.height == 0 || area.width < BUTTON_WIDTH * 5 {
        app.hits.controls = Default::default();
        return;
    }
    let theme = app.theme.clone();

    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(BUTTON_WIDTH * 5),
            Constraint::Fill(1),
        ])
        .split(area)[1];
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(BUTTON_WIDTH); 5])
        .split(row);

    for control in Control::ALL {
        let icon = match control {
            Control::Previous => "⏮",
            Control::PlayPause if app.player.status() == PlayerState::Playing => "⏸",
            Control::PlayPause => "▶",
            Control::Stop => "⏹",
            Control::Next => "⏭",
            Control::Mute if app.player.is_muted() => "🔇",
            Control::Mute => "🔊",
        };
        let pressed = app.presses[control.index()].level();
        let base = if control == Control::Mute && app.player.is_muted() {
            theme.red
        } else {
            theme.text
        };
        let mut style = Style::default()
            .fg(theme.fade(theme.glow(base, pressed), alpha))
            .add_modifier(Modifier::BOLD);
        if pressed > 0.0 {
            style = style.bg(theme.fade(theme.surface, alpha * pressed));
        }

        let rect = cells[control.index()];
        f.render_widget(
            Paragraph::new(Span::styled(icon, style)).alignment(Alignment::Center),
            rect,
        );
        app.hits.controls[control.index()] = rect;
    }
}

pub fn render_volume(f: &mut Frame, area: Rect, app: &mut App, alpha: f32) {
    if area.height == 0 || area.width < 26 {
        app.hits.volume = Rect::default();
        return;
    }
    let theme = app.theme.clone();

    let bar_width: u16 = 20;
    let vol_ratio = app.player.volume();
    let filled_width = (bar_width as f32 * vol_ratio).round() as u16;
    let fill = if app.player.is_muted() { theme.red } else { theme.magenta };

    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(2),
            Constraint::Length(bar_width),
            Constraint::Length(2),
            Constraint::Fill(1),
        ])
        .split(area);

    let dim = Style::default().fg(theme.fade(theme.overlay, alpha));
    f.render_widget(Paragraph::new("- ").style(dim), row[1]);
    f.render_widget(Paragraph::new(" +").style(dim), row[3]);

    let bar_spans: Vec<Span> = (0..bar_width)
        .map(|i| {
            if i < filled_width {
                Span::styled("━", Style::default().fg(theme.fade(fill, alpha)))
            } else {
                Span::styled("─", Style::default().fg(theme.fade(theme.surface, alpha)))
            }
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(bar_spans)), row[2]);

    app.hits.volume = row[2];
}
