//! Detail modal handlers
//!
//! The modal is the only writer of `m` and `mt`. Opening from the dashboard
//! restores the panel set from the URL, switching to a different machine
//! starts with none expanded, and refreshing the open machine carries the
//! on-screen panel visibility over.

use std::collections::BTreeSet;

use fleetdash_core::prelude::*;
use fleetdash_core::MachineDetail;

use crate::message::Message;
use crate::panel::{Panel, BASIC_STATS_KEY};
use crate::plugins::basic_stats::basic_stats_panel;
use crate::state::{AppState, DetailRequest, ModalPhase, OpenModal};
use crate::url_state::NavPatch;

use super::{UpdateAction, UpdateResult};

/// User asked to open `name`.
pub fn handle_open_machine(state: &mut AppState, name: String) -> UpdateResult {
    if state.modal.is_open_for(&name) {
        return handle_refresh_modal(state);
    }
    if state.modal.is_pending_for(&name) {
        return UpdateResult::none();
    }

    // Switching machines drops the previous machine's panels; opening from
    // the dashboard honours `mt` as the URL has it
    let mut patch = NavPatch::new().open_machine(name.clone());
    if state.modal.phase() != ModalPhase::Closed {
        patch = patch.clear_panels();
    }
    state.url.write(patch);
    state.modal.open = None;
    state.modal.notice = None;
    begin(state, name, DetailRequest::Open).into()
}

/// Reconcile the modal with `m` after a roster pass. Deep links land here.
pub(crate) fn sync_with_url(state: &mut AppState) -> Option<UpdateAction> {
    let name = state.nav().open_machine?;

    let listed = state
        .dashboard
        .roster
        .as_ref()
        .is_some_and(|r| r.contains(&name));
    if !listed {
        debug!("Machine '{}' from the location is not in the roster", name);
        return None;
    }

    if state.modal.is_pending_for(&name) {
        return None;
    }
    let kind = if state.modal.is_open_for(&name) {
        DetailRequest::Refresh
    } else {
        state.modal.open = None;
        DetailRequest::Open
    };
    Some(begin(state, name, kind))
}

/// Re-fetch the open machine.
pub fn handle_refresh_modal(state: &mut AppState) -> UpdateResult {
    let Some(name) = state.modal.open.as_ref().map(|m| m.name.clone()) else {
        return UpdateResult::none();
    };
    if state.modal.pending.is_some() {
        return UpdateResult::none();
    }
    begin(state, name, DetailRequest::Refresh).into()
}

fn begin(state: &mut AppState, name: String, kind: DetailRequest) -> UpdateAction {
    let seq = state.modal.begin_fetch(&name, kind);
    debug!("Fetching detail #{} for '{}' ({:?})", seq, name, kind);
    UpdateAction::FetchMachineDetail { seq, name }
}

pub fn handle_detail_loaded(
    state: &mut AppState,
    seq: u64,
    name: String,
    result: Result<MachineDetail>,
    fetched_at: f64,
) -> UpdateResult {
    let Some(pending) = state.modal.settle(seq) else {
        debug!("Discarding detail #{} for '{}', no longer awaited", seq, name);
        return UpdateResult::none();
    };

    match (result, pending.kind) {
        (Ok(detail), kind) => {
            let previous = match kind {
                DetailRequest::Refresh => state.modal.open.take(),
                DetailRequest::Open => None,
            };
            let url_panels = state.nav().open_panels;
            let visible = |key: &str| match previous.as_ref().and_then(|m| m.panel(key)) {
                Some(panel) => panel.visible,
                None => url_panels.contains(key),
            };

            let panels = build_panels(state, &detail, fetched_at, visible);
            let selected = previous
                .as_ref()
                .map_or(0, |m| m.selected.min(panels.len().saturating_sub(1)));

            state.modal.open = Some(OpenModal {
                name: pending.name,
                detail,
                panels,
                selected,
            });
            state.modal.notice = None;
        }
        (Err(e), DetailRequest::Refresh) => {
            warn!("Refreshing '{}' failed: {}", pending.name, e);
            state.modal.notice = Some(format!("Refresh failed: {}", e.notice()));
        }
        (Err(e), DetailRequest::Open) => {
            warn!("Opening '{}' failed: {}", pending.name, e);
            if state.nav().open_machine.as_deref() == Some(pending.name.as_str()) {
                state.url.write(NavPatch::new().clear_machine());
            }
            state.modal.notice = Some(format!("Could not open {}: {}", pending.name, e.notice()));
        }
    }
    UpdateResult::none()
}

fn build_panels(
    state: &AppState,
    detail: &MachineDetail,
    now: f64,
    visible: impl Fn(&str) -> bool,
) -> Vec<Panel> {
    let builtin = (
        BASIC_STATS_KEY.to_string(),
        basic_stats_panel(&detail.stats, now),
    );
    std::iter::once(builtin)
        .chain(state.registry.run(&detail.extras))
        .map(|(id, content)| Panel {
            visible: visible(&id),
            id,
            content,
        })
        .collect()
}

/// Flip a panel and persist the visible set immediately.
pub fn handle_toggle_panel(state: &mut AppState, key: &str) -> UpdateResult {
    let Some(modal) = state.modal.open.as_mut() else {
        return UpdateResult::none();
    };
    let Some(panel) = modal.panels.iter_mut().find(|p| p.id == key) else {
        debug!("No panel '{}' on '{}'", key, modal.name);
        return UpdateResult::none();
    };
    panel.visible = !panel.visible;

    // Keys of panels absent on this fetch keep their URL state
    let shown = modal.panel_keys();
    let open_panels: BTreeSet<String> = state
        .url
        .read()
        .open_panels
        .into_iter()
        .filter(|k| !shown.contains(k))
        .chain(modal.visible_keys())
        .collect();
    state.url.write(NavPatch::new().open_panels(open_panels));
    UpdateResult::none()
}

pub fn handle_panel_cursor(state: &mut AppState, delta: isize) -> UpdateResult {
    if let Some(modal) = state.modal.open.as_mut() {
        let last = modal.panels.len().saturating_sub(1);
        modal.selected = modal.selected.saturating_add_signed(delta).min(last);
    }
    UpdateResult::none()
}

pub fn handle_toggle_selected(state: &mut AppState) -> UpdateResult {
    match state.modal.open.as_ref().and_then(|m| m.selected_panel()) {
        Some(panel) => UpdateResult::message(Message::TogglePanel(panel.id.clone())),
        None => UpdateResult::none(),
    }
}

/// Close the modal and drop its data. `mt` is left in place; without `m`
/// it has no effect.
pub fn handle_close(state: &mut AppState) -> UpdateResult {
    if let Some(pending) = &state.modal.pending {
        debug!("Abandoning detail #{} for '{}'", pending.seq, pending.name);
    }
    state.modal.close();
    state.url.write(NavPatch::new().clear_machine());
    UpdateResult::none()
}
