use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Standard screen frame: one-line header, content, one-line footer for key
/// hints, one line above it for notices.
pub struct AppLayout {
    pub header: Rect,
    pub main: Rect,
    pub notice: Rect,
    pub footer: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            header: vertical[0],
            main: vertical[1],
            notice: vertical[2],
            footer: vertical[3],
        }
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let target_w = (area.width.saturating_mul(percent_x.min(100)) / 100).min(area.width);
    let target_h = (area.height.saturating_mul(percent_y.min(100)) / 100).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}
