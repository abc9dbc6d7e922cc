use crate::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// WhichKey-style key list in the bottom-right corner.
pub fn render(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let hints = app.keys.hints();

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        "────── Keys ──────",
        Style::default().fg(theme.neon).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    for (key, desc) in &hints {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {:>7}", key),
                Style::default().fg(theme.green).add_modifier(Modifier::BOLD),
            ),
            Span::styled("   ", Style::default().fg(theme.overlay)),
            Span::styled(*desc, Style::default().fg(theme.text)),
        ]));
    }

    // Fit content exactly 📏
    let content_width = hints
        .iter()
        .map(|(k, d)| 1 + k.width().max(7) + 3 + d.width())
        .max()
        .unwrap_or(20)
        .max(18);

    let max_height = f.area().height.saturating_sub(4);
    let popup_height = (lines.len() as u16 + 2).min(max_height);
    let popup_width = (content_width as u16 + 4).min(f.area().width.saturating_sub(2));

    let popup_x = f.area().width.saturating_sub(popup_width + 1);
    let popup_y = f.area().height.saturating_sub(popup_height + 2);
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);

    let popup = Paragraph::new(lines).alignment(Alignment::Left).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.blue))
            .style(Style::default().bg(theme.base)),
    );
    f.render_widget(popup, popup_area);
}
