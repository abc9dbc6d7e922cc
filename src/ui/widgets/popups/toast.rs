use crate::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Seconds for the slide in and the slide out.
const SLIDE: f32 = 0.3;

pub fn render(f: &mut Frame, app: &App) {
    let Some(ref toast) = app.toast else {
        return;
    };
    let theme = &app.theme;

    let message = &toast.message;
    let width = (message.width() as u16 + 6).min(f.area().width.saturating_sub(4));
    let height = 3;
    let target_x = f.area().width.saturating_sub(width + 1); // Top-right fixed
    let mut x = target_x;

    let remaining = toast.deadline - toast.age;

    // Animation: Slide In/Out 🌊
    if toast.age < SLIDE {
        let t = toast.age / SLIDE;
        let ease = 1.0 - (1.0 - t).powi(3); // Cubic Out
        x += (width as f32 * (1.0 - ease)) as u16;
    } else if remaining < SLIDE {
        let t = (SLIDE - remaining.max(0.0)) / SLIDE;
        let ease = t.powi(3); // Cubic In
        x += (width as f32 * ease) as u16;
    }

    if x >= f.area().width {
        return;
    }

    let full_area = Rect::new(x, 1, width, height);
    // Clip to screen bounds to avoid panic
    let visible_area = full_area.intersection(f.area());
    if visible_area.is_empty() {
        return;
    }

    f.render_widget(Clear, visible_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.neon))
        .style(Style::default().bg(theme.base));

    let style = Style::default().fg(theme.blue).add_modifier(Modifier::BOLD);
    let text = Paragraph::new(Line::from(vec![Span::styled(message.as_str(), style)]))
        .alignment(Alignment::Center)
        .block(block);

    f.render_widget(text, visible_area);
}
