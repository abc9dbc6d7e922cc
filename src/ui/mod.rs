pub mod components;
pub mod intro;
pub mod layout;
pub mod theme;
pub mod utils;
pub mod widgets;

pub use theme::Theme;

use crate::app::{App, HitAreas};
use ratatui::{style::Style, widgets::Block, Frame};

pub fn ui(f: &mut Frame, app: &mut App) {
    let area = f.area();

    f.render_widget(Block::default().style(Style::default().bg(app.theme.base)), area);

    if app.in_intro() {
        app.hits = HitAreas::default();
        intro::render(f, area, app);
        return;
    }

    // 1. Layout
    let main_layout = layout::get_main_layout(area);

    // 2. Mini bar (always visible, opens the panel)
    components::mini_bar::render(f, main_layout.footer_area, app);

    // 3. Panel card, scaled and faded by its open/close animation
    if app.panel.is_visible() {
        let full = layout::panel_rect(main_layout.body_area);
        let card = layout::scale_rect(full, app.panel.scale());
        widgets::player::render(f, card, app);
    } else {
        let mini_bar = app.hits.mini_bar;
        app.hits = HitAreas {
            mini_bar,
            ..Default::default()
        };
    }

    // 4. Popups (Overlays)
    widgets::popups::render(f, app);
}
