use crate::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Spectrum bars growing upward, one column per bar, coloured by height.
pub fn render(f: &mut Frame, area: Rect, app: &App, alpha: f32) {
    let theme = &app.theme;

    let width = area.width as usize;
    let height = area.height as usize;

    if height < 2 || width < 8 {
        let msg = Paragraph::new("♪")
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.fade(theme.overlay, alpha)));
        f.render_widget(msg, area);
        return;
    }

    let heights = app.visualizer.heights();
    let source_len = heights.len();
    if source_len == 0 {
        return;
    }

    // Two cells per bar plus a gap when there is room, else one
    let (bar_width, gap) = if width >= source_len * 3 { (2, 1) } else { (1, 0) };
    let bar_count = (width / (bar_width + gap)).clamp(1, source_len.max(1));

    // Resample: every screen bar takes the max of its source range
    let bars: Vec<f32> = (0..bar_count)
        .map(|i| {
            let start = (i * source_len) / bar_count;
            let end = ((i + 1) * source_len).div_ceil(bar_count).min(source_len);
            heights[start.min(source_len - 1)..end.max(start + 1).min(source_len)]
                .iter()
                .copied()
                .fold(0.0f32, f32::max)
        })
        .collect();

    let total_width = bar_count * (bar_width + gap) - gap;
    let padding = width.saturating_sub(total_width) / 2;
    let full = "█".repeat(bar_width);
    let cap = "▄".repeat(bar_width);
    let blank = " ".repeat(bar_width);

    let mut lines = Vec::with_capacity(height);
    for row in 0..height {
        let threshold = 1.0 - (row as f32 + 1.0) / height as f32;
        let half = 0.5 / height as f32;
        let mut spans = vec![Span::raw(" ".repeat(padding))];
        for (i, h) in bars.iter().enumerate() {
            let color: Color = app.visualizer.color_for(*h).into();
            let symbol = if *h > threshold + half {
                full.as_str()
            } else if *h > threshold {
                cap.as_str()
            } else {
                blank.as_str()
            };
            spans.push(Span::styled(symbol, Style::default().fg(theme.fade(color, alpha))));
            if gap > 0 && i + 1 < bars.len() {
                spans.push(Span::raw(" "));
            }
        }
        lines.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(lines), area);
}
