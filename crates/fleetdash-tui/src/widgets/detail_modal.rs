//! Detail modal: panel toggles on the left, expanded panels on the right

use fleetdash_app::state::{ModalState, OpenModal};
use fleetdash_app::{Panel, PanelField};
use fleetdash_core::Severity;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::modal_overlay;
use crate::theme::styles;

/// Width of the toggle column
const TOGGLE_WIDTH: u16 = 26;

pub struct DetailModal<'a> {
    modal: &'a ModalState,
}

impl<'a> DetailModal<'a> {
    pub fn new(modal: &'a ModalState) -> Self {
        Self { modal }
    }
}

impl Widget for DetailModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        modal_overlay::dim_background(buf, area);
        let modal_area = modal_overlay::centered_rect_percent(80, 80, area);
        modal_overlay::clear_area(buf, modal_area);
        modal_overlay::render_shadow(buf, modal_area);

        match (&self.modal.open, &self.modal.pending) {
            (Some(open), _) => render_open(open, self.modal.notice.as_deref(), modal_area, buf),
            (None, Some(pending)) => {
                let block = styles::modal_block().title(format!(" {} ", pending.name));
                Paragraph::new(Span::styled("Loading…", styles::text_muted()))
                    .block(block)
                    .render(modal_area, buf);
            }
            (None, None) => {}
        }
    }
}

fn render_open(open: &OpenModal, notice: Option<&str>, area: Rect, buf: &mut Buffer) {
    let detail = &open.detail;
    let title = Line::from(vec![
        Span::styled(format!(" {} ", open.name), styles::accent_bold()),
        Span::styled(format!("· {} · ", detail.category), styles::text_secondary()),
        Span::styled(
            if detail.online { "online " } else { "offline " },
            styles::online(detail.online),
        ),
    ]);
    let block = styles::modal_block().title(title);
    let inner = block.inner(area);
    block.render(area, buf);

    let [body, footer] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);
    let [toggles, content] =
        Layout::horizontal([Constraint::Length(TOGGLE_WIDTH), Constraint::Min(10)]).areas(body);

    Paragraph::new(toggle_lines(open)).render(toggles, buf);

    let mut lines = Vec::new();
    for panel in open.panels.iter().filter(|p| p.visible) {
        lines.extend(panel_lines(panel));
        lines.push(Line::default());
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "Select a panel and press space to expand it.",
            styles::text_muted(),
        )));
    }
    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .render(content, buf);

    if let Some(notice) = notice {
        Paragraph::new(Span::styled(notice.to_string(), styles::status_red())).render(footer, buf);
    }
}

fn toggle_lines(open: &OpenModal) -> Vec<Line<'static>> {
    open.panels
        .iter()
        .enumerate()
        .map(|(i, panel)| {
            let selected = i == open.selected;
            let marker = if selected { "▸ " } else { "  " };
            let check = if panel.visible { "[x] " } else { "[ ] " };
            let style = if selected {
                styles::accent_bold()
            } else {
                styles::text_primary()
            };
            Line::from(vec![
                Span::styled(marker, styles::accent()),
                Span::styled(check, styles::text_secondary()),
                Span::styled(panel.content.title.clone(), style),
            ])
        })
        .collect()
}

fn panel_lines(panel: &Panel) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        panel.content.title.clone(),
        styles::accent_bold().add_modifier(Modifier::UNDERLINED),
    ))];
    for section in &panel.content.sections {
        lines.push(Line::from(Span::styled(
            section.heading.clone(),
            styles::text_secondary().add_modifier(Modifier::BOLD),
        )));
        lines.extend(section.fields.iter().map(field_line));
    }
    lines
}

fn field_line(field: &PanelField) -> Line<'static> {
    if field.label.is_empty() {
        return Line::from(Span::styled(
            format!("  {}", field.value),
            styles::text_muted().add_modifier(Modifier::ITALIC),
        ));
    }

    let value_style = match field.severity {
        Severity::Normal => styles::text_primary(),
        other => styles::severity(other),
    };
    let mut spans = vec![
        Span::styled(format!("  {:<14}", field.label), styles::text_secondary()),
        Span::styled(field.value.clone(), value_style),
    ];
    if let Some(hint) = &field.hint {
        spans.push(Span::styled(format!("  ({hint})"), styles::text_muted()));
    }
    Line::from(spans)
}
