use crate::app::App;
use crate::ui::utils::truncate;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App, alpha: f32) {
    if area.height == 0 {
        return;
    }
    let theme = &app.theme;
    let max_width = area.width.saturating_sub(4) as usize;

    let mut lines = Vec::new();
    match app.player.current_clip() {
        Some(clip) => {
            lines.push(Line::from(Span::styled(
                format!("🎵 {}", truncate(&clip.name, max_width.saturating_sub(2))),
                Style::default()
                    .fg(theme.fade(theme.text, alpha))
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                format!(
                    "{} / {}",
                    app.player.track_index() + 1,
                    app.player.playlist().len()
                ),
                Style::default()
                    .fg(theme.fade(theme.cyan, alpha))
                    .add_modifier(Modifier::DIM),
            )));
        }
        None => lines.push(Line::from(Span::styled(
            "No tracks",
            Style::default().fg(theme.fade(theme.overlay, alpha)),
        ))),
    }

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
