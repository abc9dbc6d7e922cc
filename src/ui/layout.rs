use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct MainLayout {
    pub body_area: Rect,
    pub footer_area: Rect,
}

pub fn get_main_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Mini bar
        ])
        .split(area);

    MainLayout {
        body_area: chunks[0],
        footer_area: chunks[1],
    }
}

/// Largest panel card that fits in `area`, before scaling.
pub fn panel_rect(area: Rect) -> Rect {
    let width = area.width.min(64);
    let height = area.height.min(22);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// `rect` shrunk about its centre by `scale` in `[0, 1]`.
pub fn scale_rect(rect: Rect, scale: f32) -> Rect {
    let scale = if scale.is_finite() { scale.clamp(0.0, 1.0) } else { 0.0 };
    let width = (rect.width as f32 * scale).round() as u16;
    let height = (rect.height as f32 * scale).round() as u16;
    Rect::new(
        rect.x + (rect.width - width) / 2,
        rect.y + (rect.height - height) / 2,
        width,
        height,
    )
}

/// Cell on the border of `rect` at clockwise `offset`, starting top-left.
pub fn perimeter_cell(rect: Rect, offset: usize) -> Option<(u16, u16)> {
    if rect.width < 2 || rect.height < 2 {
        return None;
    }
    let w = rect.width as usize;
    let h = rect.height as usize;
    let perimeter = 2 * (w + h) - 4;
    let i = offset % perimeter;
    let (x, y) = if i < w {
        (i, 0)
    } else if i < w + h - 1 {
        (w - 1, i - w + 1)
    } else if i < 2 * w + h - 2 {
        (w - 1 - (i - (w + h - 2)), h - 1)
    } else {
        (0, h - 1 - (i - (2 * w + h - 3)))
    };
    Some((rect.x + x as u16, rect.y + y as u16))
}

pub fn perimeter_len(rect: Rect) -> usize {
    if rect.width < 2 || rect.height < 2 {
        return 0;
    }
    2 * (rect.width as usize + rect.height as usize) - 4
}
