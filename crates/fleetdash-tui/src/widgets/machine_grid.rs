//! Machine grid: one card per machine in the selected category

use fleetdash_app::{DashboardPhase, GridCell, GridView, Reading};
use fleetdash_core::format::UNKNOWN;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::theme::styles;

/// Card size including borders
pub const CELL_WIDTH: u16 = 24;
pub const CELL_HEIGHT: u16 = 6;

pub struct MachineGrid<'a> {
    grid: Option<&'a GridView>,
    cursor: usize,
    phase: DashboardPhase,
}

impl<'a> MachineGrid<'a> {
    pub fn new(grid: Option<&'a GridView>, phase: DashboardPhase) -> Self {
        Self {
            grid,
            cursor: 0,
            phase,
        }
    }

    pub fn cursor(mut self, cursor: usize) -> Self {
        self.cursor = cursor;
        self
    }
}

impl Widget for MachineGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(grid) = self.grid else {
            let message = match self.phase {
                DashboardPhase::Loading => "Loading roster…",
                _ => "No data yet. Press r to retry.",
            };
            placeholder(message, area, buf);
            return;
        };

        let title = format!(
            " {} · {}/{} online ",
            grid.category, grid.online_count, grid.total_count
        );
        let block = styles::glass_block(false).title(title);
        let inner = block.inner(area);
        block.render(area, buf);

        if grid.is_empty() {
            let message = format!("No machines in category '{}'", grid.category);
            Paragraph::new(Span::styled(message, styles::text_muted()))
                .alignment(Alignment::Center)
                .render(inner, buf);
            return;
        }

        let columns = usize::from((inner.width / CELL_WIDTH).max(1));
        let visible_rows = usize::from((inner.height / CELL_HEIGHT).max(1));
        let cursor_row = self.cursor / columns;
        let first_row = cursor_row.saturating_sub(visible_rows - 1);

        for (index, cell) in grid.cells.iter().enumerate().skip(first_row * columns) {
            let row = index / columns - first_row;
            if row >= visible_rows {
                break;
            }
            let col = index % columns;
            let cell_area = Rect::new(
                inner.x + col as u16 * CELL_WIDTH,
                inner.y + row as u16 * CELL_HEIGHT,
                CELL_WIDTH.min(inner.width),
                CELL_HEIGHT.min(inner.height),
            )
            .intersection(inner);
            render_cell(cell, index == self.cursor, cell_area, buf);
        }
    }
}

fn placeholder(message: &str, area: Rect, buf: &mut Buffer) {
    Paragraph::new(Span::styled(message.to_string(), styles::text_muted()))
        .alignment(Alignment::Center)
        .block(styles::glass_block(false))
        .render(area, buf);
}

fn render_cell(cell: &GridCell, selected: bool, area: Rect, buf: &mut Buffer) {
    let name_width = usize::from(CELL_WIDTH.saturating_sub(6));
    let title = Line::from(vec![
        Span::styled(" ● ", styles::online(cell.online)),
        Span::styled(
            format!("{} ", truncate(&cell.name, name_width)),
            if selected {
                styles::accent_bold()
            } else {
                styles::text_primary()
            },
        ),
    ]);
    let block = styles::glass_block(selected).title(title);

    let status = if cell.online {
        Span::styled("online", styles::status_green())
    } else {
        Span::styled("offline", styles::status_red())
    };

    let mut lines = vec![Line::from(status)];
    match &cell.stats {
        Some(stats) => {
            lines.push(reading_line("CPU ", stats.cpu_load, |v| format!("{v:.2}")));
            lines.push(reading_line("RAM ", stats.ram_percent, |v| format!("{v:.1}%")));
            lines.push(reading_line("Disk", stats.disk_percent, |v| format!("{v:.1}%")));
        }
        None => lines.push(Line::from(Span::styled("invalid stats", styles::text_muted()))),
    }

    Paragraph::new(lines).block(block).render(area, buf);
}

fn reading_line(label: &'static str, reading: Reading, fmt: impl Fn(f64) -> String) -> Line<'static> {
    let (value, style) = match reading.value {
        Some(v) => (fmt(v), styles::severity(reading.severity)),
        None => (UNKNOWN.to_string(), Style::default()),
    };
    Line::from(vec![
        Span::styled(format!("{label} "), styles::text_secondary()),
        Span::styled(value, style),
    ])
}

/// Cut `text` to `max` display columns, marking the cut with `…`.
fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w + 1 > max {
            break;
        }
        width += w;
        out.push(ch);
    }
    out.push('…');
    out
}
