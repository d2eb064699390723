//! Category menu: one tab per category, ascending

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Tabs, Widget},
};

use crate::theme::styles;

pub struct CategoryMenu<'a> {
    categories: &'a [String],
    selected: Option<&'a str>,
}

impl<'a> CategoryMenu<'a> {
    pub fn new(categories: &'a [String], selected: Option<&'a str>) -> Self {
        Self {
            categories,
            selected,
        }
    }
}

impl Widget for CategoryMenu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).title(" Categories ");

        if self.categories.is_empty() {
            Paragraph::new(Span::styled("none yet", styles::text_muted()))
                .block(block)
                .render(area, buf);
            return;
        }

        let index = self
            .selected
            .and_then(|selected| self.categories.iter().position(|c| c == selected));
        let titles = self
            .categories
            .iter()
            .map(|c| Line::from(c.as_str()))
            .collect::<Vec<_>>();

        Tabs::new(titles)
            .block(block)
            .style(styles::text_secondary())
            .highlight_style(styles::accent_bold())
            .divider(Span::styled("│", styles::text_muted()))
            .select(index)
            .render(area, buf);
    }
}
