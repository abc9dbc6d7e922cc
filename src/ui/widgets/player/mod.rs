use crate::app::{App, HitAreas};
use crate::ui::components::visualizer;
use crate::ui::layout::{perimeter_cell, perimeter_len};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear},
    Frame,
};

pub mod art;
pub mod controls;
pub mod info;
pub mod progress;

const SPIN_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    app.hits.panel = area;
    if area.width < 4 || area.height < 3 {
        app.hits = HitAreas {
            panel: area,
            mini_bar: app.hits.mini_bar,
            ..Default::default()
        };
        return;
    }

    let theme = app.theme.clone();
    let alpha = app.panel.alpha();

    // Border glows on every pulse
    let border = theme.fade(theme.glow(theme.neon, app.pulse.level() * 0.6), alpha);

    let music_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Line::from(Span::styled(
            " Now Playing ",
            Style::default().fg(border).add_modifier(Modifier::BOLD),
        )))
        .title_alignment(Alignment::Left)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(theme.base));

    let inner = music_block.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(music_block, area);

    // Neon running lights on the border while hovered
    if app.lights.is_visible() {
        let light = theme.fade(theme.glow(theme.neon, 0.5), alpha);
        let buf = f.buffer_mut();
        for offset in app.lights.offsets(perimeter_len(area)) {
            if let Some((x, y)) = perimeter_cell(area, offset) {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_symbol("●").set_fg(light);
                }
            }
        }
    }

    let tiny = inner.height < 10;
    let constraints = if tiny {
        vec![
            Constraint::Length(0), // 0: Art (Hidden)
            Constraint::Length(1), // 1: Info
            Constraint::Min(0),    // 2: Visualizer
            Constraint::Length(1), // 3: Gauge
            Constraint::Length(0), // 4: Time (Hidden)
            Constraint::Length(1), // 5: Controls
            Constraint::Length(0), // 6: Volume (Hidden)
        ]
    } else {
        vec![
            Constraint::Length(1), // 0: Art
            Constraint::Length(2), // 1: Info
            Constraint::Min(0),    // 2: Visualizer
            Constraint::Length(1), // 3: Gauge
            Constraint::Length(1), // 4: Time
            Constraint::Length(1), // 5: Controls
            Constraint::Length(1), // 6: Volume
        ]
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    art::render(f, chunks[0], app, &SPIN_FRAMES, alpha);
    info::render(f, chunks[1], app, alpha);
    visualizer::render(f, chunks[2], app, alpha);
    progress::render_progress(f, chunks[3], app, alpha);
    progress::render_time(f, chunks[4], app, alpha);
    controls::render(f, chunks[5], app, alpha);
    controls::render_volume(f, chunks[6], app, alpha);
}
