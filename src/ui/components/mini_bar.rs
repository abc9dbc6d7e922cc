use crate::app::App;
use crate::player::PlayerState;
use crate::ui::utils::truncate;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    layout::Alignment,
    Frame,
};

/// One-line now-playing strip along the bottom. Clicking it opens the panel.
pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = app.theme.clone();

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(22)])
        .split(area);

    let icon = match app.player.status() {
        PlayerState::Playing => "▶",
        PlayerState::Paused => "⏸",
        PlayerState::Stopped => "⏹",
    };

    let mut spans = vec![Span::styled(
        format!(" {} ", icon),
        Style::default().fg(theme.neon).add_modifier(Modifier::BOLD),
    )];
    match app.player.current_clip() {
        Some(clip) => {
            let max = (chunks[0].width as usize).saturating_sub(20);
            spans.push(Span::styled(
                truncate(&clip.name, max),
                Style::default().fg(theme.text),
            ));
            spans.push(Span::styled(
                format!("  {} / {}", app.player.elapsed_label(), app.player.length_label()),
                Style::default().fg(theme.overlay),
            ));
        }
        None => spans.push(Span::styled(
            "no music found",
            Style::default().fg(theme.overlay).add_modifier(Modifier::ITALIC),
        )),
    }
    if app.player.is_muted() {
        spans.push(Span::styled("  🔇", Style::default().fg(theme.red)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);

    let hint = Line::from(vec![
        Span::styled(
            format!(" {} ", app.keys.display(&app.keys.toggle_panel)),
            Style::default().fg(theme.overlay).add_modifier(Modifier::BOLD),
        ),
        Span::styled("panel", Style::default().fg(theme.overlay)),
        Span::styled(
            format!("  {} ", app.keys.display(&app.keys.toggle_keyhints)),
            Style::default().fg(theme.overlay).add_modifier(Modifier::BOLD),
        ),
        Span::styled("keys ", Style::default().fg(theme.overlay)),
    ]);
    f.render_widget(Paragraph::new(hint).alignment(Alignment::Right), chunks[1]);

    app.hits.mini_bar = area;
}
