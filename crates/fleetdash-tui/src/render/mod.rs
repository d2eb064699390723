//! Main render/view function (View in TEA pattern)


use fleetdash_app::{AppState, ModalPhase};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::theme::palette;
use crate::{layout, widgets};

/// Render the complete UI. Pure: reads state, never mutates it.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    let bg_block = Block::default().style(Style::default().bg(palette::DEEPEST_BG));
    frame.render_widget(bg_block, area);

    let areas = layout::create(area, state.settings.ui.show_url);
    let dashboard = &state.dashboard;

    frame.render_widget(
        widgets::MainHeader::new(dashboard.server.as_ref())
            .refreshed_at(dashboard.refreshed_at)
            .fetching(dashboard.is_fetching()),
        areas.header,
    );

    frame.render_widget(
        widgets::CategoryMenu::new(&dashboard.categories, dashboard.selected_category()),
        areas.categories,
    );

    frame.render_widget(
        widgets::MachineGrid::new(dashboard.grid.as_ref(), dashboard.phase).cursor(dashboard.cursor),
        areas.grid,
    );

    frame.render_widget(widgets::StatusBar::new(state), areas.status);

    if state.modal.phase() != ModalPhase::Closed {
        frame.render_widget(widgets::DetailModal::new(&state.modal), area);
    }
}
