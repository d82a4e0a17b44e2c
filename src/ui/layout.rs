//! Layout computation for the player screen.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Computed layout areas for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerLayout {
    /// Track information panel
    pub info: Rect,
    /// Waveform block (including its border)
    pub waveform: Rect,
    /// Key help line
    pub help: Rect,
}

/// Split the screen: info on top, the waveform below, one help line.
pub fn compute_layout(area: Rect) -> PlayerLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Percentage(45),
            Constraint::Length(1),
        ])
        .split(area);

    PlayerLayout {
        info: chunks[0],
        waveform: chunks[1],
        help: chunks[2],
    }
}

/// Translate a clicked terminal column into a surface x offset.
///
/// `inner` is the area the canvas paints into. Returns `None` for clicks
/// outside it. Columns map to the center of their pixel span.
pub fn click_offset(inner: Rect, column: u16, row: u16, surface_width: u32) -> Option<f64> {
    let inside_x = column >= inner.x && column < inner.x + inner.width;
    let inside_y = row >= inner.y && row < inner.y + inner.height;
    if !inside_x || !inside_y {
        return None;
    }

    let cell = (column - inner.x) as f64 + 0.5;
    Some(cell * surface_width as f64 / inner.width as f64)
}
