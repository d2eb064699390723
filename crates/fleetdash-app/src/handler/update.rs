//! Main update function - handles state transitions (TEA pattern)

use crate::message::Message;
use crate::state::AppState;

use super::{dashboard, keys::handle_key, modal, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.request_quit();
            UpdateResult::none()
        }

        Message::Key(key) => {
            if let Some(msg) = handle_key(state, key) {
                UpdateResult::message(msg)
            } else {
                UpdateResult::none()
            }
        }

        // ─────────────────────────────────────────────────────────
        // Dashboard Messages
        // ─────────────────────────────────────────────────────────
        Message::Start => dashboard::handle_start(state),
        Message::RefreshTick => dashboard::handle_refresh_tick(state),
        Message::Refresh => dashboard::handle_refresh(state),
        Message::SelectCategory(category) => dashboard::handle_select_category(state, category),
        Message::NextCategory => dashboard::handle_step_category(state, 1),
        Message::PreviousCategory => dashboard::handle_step_category(state, -1),
        Message::CursorUp => dashboard::handle_cursor(state, -1),
        Message::CursorDown => dashboard::handle_cursor(state, 1),
        Message::OpenSelected => dashboard::handle_open_selected(state),
        Message::RosterLoaded {
            seq,
            result,
            received_at,
        } => dashboard::handle_roster_loaded(state, seq, result, received_at),
        Message::RequestServerSummary => {
            UpdateResult::action(super::UpdateAction::FetchServerSummary)
        }
        Message::ServerSummaryLoaded(result) => {
            dashboard::handle_server_summary_loaded(state, result)
        }

        // ─────────────────────────────────────────────────────────
        // Modal Messages
        // ─────────────────────────────────────────────────────────
        Message::OpenMachine(name) => modal::handle_open_machine(state, name),
        Message::TogglePanel(key) => modal::handle_toggle_panel(state, &key),
        Message::PanelUp => modal::handle_panel_cursor(state, -1),
        Message::PanelDown => modal::handle_panel_cursor(state, 1),
        Message::ToggleSelectedPanel => modal::handle_toggle_selected(state),
        Message::RefreshModal => modal::handle_refresh_modal(state),
        Message::CloseModal => modal::handle_close(state),
        Message::DetailLoaded {
            seq,
            name,
            result,
            fetched_at,
        } => modal::handle_detail_loaded(state, seq, name, result, fetched_at),
    }
}
