use crate::anim::{Lerp, Rgb};
use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const GRADIENT_START: Rgb = Rgb(255, 0, 255);
const GRADIENT_MID: Rgb = Rgb(255, 51, 255);
const GRADIENT_END: Rgb = Rgb(255, 153, 255);
const TRACK: Rgb = Rgb(45, 0, 54);

/// Three-stop magenta gradient used by the intro progress strip.
pub fn gradient(t: f32) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        GRADIENT_START.lerp(GRADIENT_MID, t * 2.0)
    } else {
        GRADIENT_MID.lerp(GRADIENT_END, (t - 0.5) * 2.0)
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let intro = &app.intro;
    let alpha = intro.alpha();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(1), // Title
            Constraint::Length(1),
            Constraint::Length(1), // Subtitle
            Constraint::Length(1),
            Constraint::Length(1), // Progress
            Constraint::Fill(1),
        ])
        .split(area);

    let title = Paragraph::new(Line::from(Span::styled(
        intro.settings().title.as_str(),
        Style::default()
            .fg(theme.fade(theme.neon, alpha))
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[1]);

    let subtitle = Paragraph::new(Line::from(Span::styled(
        intro.settings().subtitle.as_str(),
        Style::default()
            .fg(theme.fade(theme.overlay, alpha))
            .add_modifier(Modifier::ITALIC),
    )))
    .alignment(Alignment::Center);
    f.render_widget(subtitle, chunks[3]);

    let strip = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(50),
            Constraint::Percentage(25),
        ])
        .split(chunks[5])[1];

    let width = strip.width as usize;
    let filled = (width as f32 * intro.progress()) as usize;
    let spans: Vec<Span> = (0..width)
        .map(|i| {
            if i < filled {
                let c: Color = gradient(i as f32 / width.max(1) as f32).into();
                Span::styled("━", Style::default().fg(theme.fade(c, alpha)))
            } else {
                let c: Color = TRACK.into();
                Span::styled("─", Style::default().fg(theme.fade(c, alpha)))
            }
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(spans)), strip);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_stops() {
        assert_eq!(gradient(0.0), GRADIENT_START);
        assert_eq!(gradient(0.5), GRADIENT_MID);
        assert_eq!(gradient(1.0), GRADIENT_END);
        assert_eq!(gradient(2.0), GRADIENT_END);
    }
}
