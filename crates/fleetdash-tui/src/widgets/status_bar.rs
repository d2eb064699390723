//! Status bar: key hints, last notice, and the live URL

use fleetdash_app::{AppState, ModalPhase};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::styles;

pub struct StatusBar<'a> {
    state: &'a AppState,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn hints(&self) -> Line<'static> {
        let key = |k: &'static str| Span::styled(k, styles::accent());
        let label = |l: &'static str| Span::styled(l, styles::text_secondary());

        if self.state.modal.phase() != ModalPhase::Closed {
            return Line::from(vec![
                key("↑/↓"),
                label(" panel  "),
                key("space"),
                label(" toggle  "),
                key("r"),
                label(" refresh  "),
                key("esc"),
                label(" close"),
            ]);
        }

        // Refresh is disabled while its own fetch is in flight
        let refresh = if self.state.dashboard.is_fetching() {
            Span::styled("r refresh  ", styles::text_muted())
        } else {
            Span::styled("r refresh  ", styles::text_secondary())
        };
        Line::from(vec![
            key("←/→"),
            label(" category  "),
            key("↑/↓"),
            label(" select  "),
            key("⏎"),
            label(" open  "),
            refresh,
            key("q"),
            label(" quit"),
        ])
    }

    fn notice(&self) -> Option<&str> {
        match self.state.modal.phase() {
            ModalPhase::Closed => self.state.dashboard.notice.as_deref(),
            _ => self
                .state
                .modal
                .notice
                .as_deref()
                .or(self.state.dashboard.notice.as_deref()),
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let [first, rest] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

        Paragraph::new(self.hints()).render(first, buf);
        if let Some(notice) = self.notice() {
            Paragraph::new(Span::styled(format!("⚠ {notice}"), styles::status_red()))
                .alignment(Alignment::Right)
                .render(first, buf);
        }

        if rest.height > 0 && self.state.settings.ui.show_url {
            let href = self.state.href();
            Paragraph::new(Line::from(vec![
                Span::styled("url ", styles::text_muted()),
                Span::styled(href.to_string(), styles::text_secondary()),
            ]))
            .render(rest, buf);
        }
    }
}
