//! Dashboard handlers: roster refresh cycle, category selection, grid cursor

use chrono::{DateTime, Local};
use fleetdash_core::prelude::*;
use fleetdash_core::{MachineRoster, ServerSummary};

use crate::grid::GridView;
use crate::message::Message;
use crate::state::{AppState, DashboardPhase};
use crate::url_state::NavPatch;

use super::{modal, UpdateAction, UpdateResult};

/// Initial load
pub fn handle_start(state: &mut AppState) -> UpdateResult {
    info!("Dashboard starting at {}", state.href());
    start_fetch(state)
}

/// Timer fire. Skipped while the previous fetch is still out.
pub fn handle_refresh_tick(state: &mut AppState) -> UpdateResult {
    if state.dashboard.is_fetching() {
        debug!("Refresh tick skipped, roster fetch in flight");
        return UpdateResult::none();
    }
    start_fetch(state)
}

/// Manual refresh. Disabled for the duration of an in-flight fetch.
pub fn handle_refresh(state: &mut AppState) -> UpdateResult {
    if state.dashboard.is_fetching() {
        trace!("Refresh ignored, roster fetch in flight");
        return UpdateResult::none();
    }
    start_fetch(state)
}

fn start_fetch(state: &mut AppState) -> UpdateResult {
    let seq = state.dashboard.begin_fetch();
    debug!("Fetching roster #{}", seq);
    UpdateResult::action(UpdateAction::FetchRoster { seq })
}

pub fn handle_roster_loaded(
    state: &mut AppState,
    seq: u64,
    result: Result<MachineRoster>,
    received_at: DateTime<Local>,
) -> UpdateResult {
    if !state.dashboard.settle(seq) {
        debug!(
            "Discarding stale roster #{} (last applied #{})",
            seq,
            state.dashboard.last_applied_seq()
        );
        return UpdateResult::none();
    }

    let roster = match result {
        Ok(roster) => roster,
        Err(e) => {
            // Previous grid stays on screen
            warn!("Roster fetch #{} failed: {}", seq, e);
            state.dashboard.notice = Some(e.notice());
            return UpdateResult::none();
        }
    };

    state.dashboard.mark_applied(seq);
    apply_roster(state, roster, received_at);

    let action = modal::sync_with_url(state);
    UpdateResult::from(action).with_message(Message::RequestServerSummary)
}

fn apply_roster(state: &mut AppState, roster: MachineRoster, received_at: DateTime<Local>) {
    let categories = roster.categories();

    let category = match state.nav().category {
        Some(category) => category,
        None => match categories.first() {
            Some(first) => {
                debug!("No category selected, defaulting to '{}'", first);
                state.url.write(NavPatch::new().category(first.clone()));
                first.clone()
            }
            None => String::new(),
        },
    };

    let grid = GridView::build(&roster, &category);

    // Keep the cursor on the same machine when it is still listed
    let dash = &mut state.dashboard;
    let clamped = dash.cursor.min(grid.cells.len().saturating_sub(1));
    dash.cursor = dash
        .selected_cell()
        .and_then(|cell| grid.position(&cell.name))
        .unwrap_or(clamped);
    dash.grid = Some(grid);
    dash.categories = categories;
    dash.roster = Some(roster);
    dash.notice = None;
    dash.refreshed_at = Some(received_at);
    if !dash.is_fetching() {
        dash.phase = DashboardPhase::Rendered;
    }
}

/// Write the category and re-render. Rebuilds the grid from the last roster
/// right away, then refreshes it.
pub fn handle_select_category(state: &mut AppState, category: String) -> UpdateResult {
    state.url.write(NavPatch::new().category(category.clone()));

    let dash = &mut state.dashboard;
    if let Some(roster) = &dash.roster {
        dash.grid = Some(GridView::build(roster, &category));
        dash.cursor = 0;
    }

    handle_refresh(state)
}

pub fn handle_step_category(state: &mut AppState, delta: isize) -> UpdateResult {
    let dash = &state.dashboard;
    let len = dash.categories.len();
    if len == 0 {
        return UpdateResult::none();
    }

    let next = match dash
        .selected_category()
        .and_then(|current| dash.categories.iter().position(|c| c == current))
    {
        Some(index) => (index as isize + delta).rem_euclid(len as isize) as usize,
        None => 0,
    };

    UpdateResult::message(Message::SelectCategory(dash.categories[next].clone()))
}

pub fn handle_cursor(state: &mut AppState, delta: isize) -> UpdateResult {
    let dash = &mut state.dashboard;
    let len = dash.grid.as_ref().map_or(0, |g| g.cells.len());
    if len > 0 {
        dash.cursor = dash.cursor.saturating_add_signed(delta).min(len - 1);
    }
    UpdateResult::none()
}

pub fn handle_open_selected(state: &mut AppState) -> UpdateResult {
    match state.dashboard.selected_cell() {
        Some(cell) => UpdateResult::message(Message::OpenMachine(cell.name.clone())),
        None => UpdateResult::none(),
    }
}

pub fn handle_server_summary_loaded(
    state: &mut AppState,
    result: Result<ServerSummary>,
) -> UpdateResult {
    match result {
        Ok(summary) => state.dashboard.server = Some(summary),
        Err(e) => debug!("Server summary unavailable: {}", e),
    }
    UpdateResult::none()
}
