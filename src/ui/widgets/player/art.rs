use crate::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Spinning disc glyph. Shrinks to the bare glyph for a moment after a
/// track change.
pub fn render(f: &mut Frame, area: Rect, app: &App, frames: &[&str], alpha: f32) {
    if area.height == 0 {
        return;
    }
    let theme = &app.theme;
    let glyph = app.spin.frame(frames);

    let text = if app.bump.scale() < 0.95 {
        glyph.to_string()
    } else {
        format!("(( {} ))", glyph)
    };

    let style = Style::default()
        .fg(theme.fade(theme.magenta, alpha))
        .add_modifier(Modifier::BOLD);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(text, style))).alignment(Alignment::Center),
        area,
    );
}
