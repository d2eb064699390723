//! Screen layout definitions for the TUI

use ratatui::layout::{Constraint, Layout, Rect};

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Title, server summary, refresh state
    pub header: Rect,

    /// Category menu
    pub categories: Rect,

    /// Machine grid for the selected category
    pub grid: Rect,

    /// Key hints and notices, plus the live URL when enabled
    pub status: Rect,
}

/// Create the main screen layout
pub fn create(area: Rect, show_url: bool) -> ScreenAreas {
    let status_height = if show_url { 2 } else { 1 };

    let chunks = Layout::vertical([
        Constraint::Length(3),             // Header (glass container)
        Constraint::Length(3),             // Category menu
        Constraint::Min(3),                // Grid
        Constraint::Length(status_height), // Status bar
    ])
    .split(area);

    ScreenAreas {
        header: chunks[0],
        categories: chunks[1],
        grid: chunks[2],
        status: chunks[3],
    }
}
