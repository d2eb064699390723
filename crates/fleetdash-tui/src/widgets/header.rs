//! Header bar: title, server summary, refresh state

use chrono::{DateTime, Local};
use fleetdash_core::{format_bytes, ServerSummary};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::{palette, styles};

pub struct MainHeader<'a> {
    server: Option<&'a ServerSummary>,
    refreshed_at: Option<DateTime<Local>>,
    fetching: bool,
}

impl<'a> MainHeader<'a> {
    pub fn new(server: Option<&'a ServerSummary>) -> Self {
        Self {
            server,
            refreshed_at: None,
            fetching: false,
        }
    }

    pub fn refreshed_at(mut self, at: Option<DateTime<Local>>) -> Self {
        self.refreshed_at = at;
        self
    }

    pub fn fetching(mut self, fetching: bool) -> Self {
        self.fetching = fetching;
        self
    }

    fn summary_spans(&self) -> Vec<Span<'static>> {
        let mut spans = vec![Span::styled("fleetdash", styles::accent_bold())];
        let Some(server) = self.server else {
            return spans;
        };

        spans.push(Span::styled("  │  ", styles::text_muted()));
        spans.push(Span::styled(
            format!("{}/{} online", server.online_machines, server.total_machines),
            styles::text_primary(),
        ));
        if !server.api_version.is_empty() {
            spans.push(Span::styled(
                format!("  api {}", server.api_version),
                styles::text_secondary(),
            ));
        }
        if let Some(size) = server.db_size {
            spans.push(Span::styled(
                format!("  db {}", format_bytes(size as f64, 1)),
                styles::text_secondary(),
            ));
        }
        spans
    }

    fn refresh_span(&self) -> Span<'static> {
        if self.fetching {
            Span::styled("⟳ refreshing", styles::status_yellow())
        } else if let Some(at) = self.refreshed_at {
            Span::styled(format!("updated {}", at.format("%H:%M:%S")), styles::text_muted())
        } else {
            Span::raw("")
        }
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        Paragraph::new(Line::from(self.summary_spans())).render(inner, buf);
        Paragraph::new(Line::from(self.refresh_span()))
            .alignment(Alignment::Right)
            .render(inner, buf);
    }
}
