use crate::app::App;
use crate::player::format_time;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render_progress(f: &mut Frame, area: Rect, app: &mut App, alpha: f32) {
    if area.height == 0 {
        app.hits.progress = Rect::default();
        return;
    }
    let theme = app.theme.clone();

    let gauge_area_rect = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(10),
            Constraint::Percentage(80),
            Constraint::Percentage(10),
        ])
        .split(area)[1];

    let ratio = app.progress_display();
    let width = gauge_area_rect.width as usize;
    let occupied_width = (width as f32 * ratio.clamp(0.0, 1.0)) as usize;
    let knob = if app.scrub.is_some() { theme.yellow } else { theme.neon };
    let fill_style = Style::default().fg(theme.fade(theme.magenta, alpha));
    let knob_style = Style::default().fg(theme.fade(knob, alpha));
    let empty_style = Style::default().fg(theme.fade(theme.surface, alpha));

    let mut bar_spans: Vec<Span> = Vec::with_capacity(width);
    for i in 0..width {
        if i < occupied_width {
            if i == occupied_width.saturating_sub(1) {
                // Playhead knob
                bar_spans.push(Span::styled("●", knob_style));
            } else {
                bar_spans.push(Span::styled("━", fill_style));
            }
        } else {
            bar_spans.push(Span::styled("─", empty_style));
        }
    }

    f.render_widget(Paragraph::new(Line::from(bar_spans)), gauge_area_rect);
    app.hits.progress = gauge_area_rect;
}

pub fn render_time(f: &mut Frame, area: Rect, app: &App, alpha: f32) {
    if area.height == 0 {
        return;
    }
    let theme = &app.theme;
    // While scrubbing show where the release will land
    let elapsed = match (app.scrub, app.player.length()) {
        (Some(ratio), Some(length)) => format_time(ratio * length),
        _ => app.player.elapsed_label(),
    };
    let time_label = Paragraph::new(format!("{} / {}", elapsed, app.player.length_label()))
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.fade(theme.overlay, alpha)));
    f.render_widget(time_label, area);
}
