//! Tests for handler module

use std::sync::Arc;

use chrono::Local;
use fleetdash_core::{
    Error, Extras, MachineDetail, MachineRoster, MachineStats, MachineSummary, Result,
    StatsReport, Usage,
};
use serde_json::json;

use super::*;
use crate::config::Settings;
use crate::input_key::InputKey;
use crate::message::Message;
use crate::panel::BASIC_STATS_KEY;
use crate::plugins::PluginRegistry;
use crate::state::{AppState, DashboardPhase, ModalPhase};
use crate::url_state::MemoryLocation;

const BASE: &str = "http://fleet.local/machines";

fn state_at(url: &str) -> AppState {
    AppState::new(
        Settings::default(),
        Box::new(MemoryLocation::parse(url).unwrap()),
        Arc::new(PluginRegistry::with_builtin().unwrap()),
    )
}

fn summary(name: &str, category: &str, online: bool) -> MachineSummary {
    MachineSummary {
        name: name.into(),
        category: category.into(),
        online,
        stats: StatsReport::Invalid,
    }
}

fn fleet() -> MachineRoster {
    [
        summary("node1", "A", true),
        summary("node2", "A", false),
        summary("node3", "A", true),
        summary("web1", "B", true),
        summary("web2", "B", true),
    ]
    .into_iter()
    .collect()
}

fn detail(name: &str, with_xmrig: bool) -> MachineDetail {
    let mut extras = Extras::new();
    if with_xmrig {
        extras.insert("xmrig", json!({ "hashrate": { "current": 1200.0 } }));
    }
    MachineDetail {
        name: name.into(),
        category: "A".into(),
        online: true,
        stats: StatsReport::Valid(MachineStats {
            ram: Some(Usage::new(50, 200)),
            ..Default::default()
        }),
        extras,
    }
}

/// Run one roster cycle to completion.
fn load_roster(state: &mut AppState, roster: MachineRoster) -> UpdateResult {
    let seq = expect_roster_fetch(update(state, Message::Refresh));
    roster_loaded(state, seq, Ok(roster))
}

fn roster_loaded(state: &mut AppState, seq: u64, result: Result<MachineRoster>) -> UpdateResult {
    update(
        state,
        Message::RosterLoaded {
            seq,
            result,
            received_at: Local::now(),
        },
    )
}

fn detail_loaded(
    state: &mut AppState,
    seq: u64,
    name: &str,
    result: Result<MachineDetail>,
) -> UpdateResult {
    update(
        state,
        Message::DetailLoaded {
            seq,
            name: name.into(),
            result,
            fetched_at: 1_700_000_000.0,
        },
    )
}

fn expect_roster_fetch(result: UpdateResult) -> u64 {
    match result.action {
        Some(UpdateAction::FetchRoster { seq }) => seq,
        other => panic!("expected FetchRoster, got {other:?}"),
    }
}

fn expect_detail_fetch(result: UpdateResult) -> (u64, String) {
    match result.action {
        Some(UpdateAction::FetchMachineDetail { seq, name }) => (seq, name),
        other => panic!("expected FetchMachineDetail, got {other:?}"),
    }
}

/// Open `name` by user action and deliver the detail.
fn open(state: &mut AppState, name: &str, with_xmrig: bool) {
    let (seq, requested) = expect_detail_fetch(update(state, Message::OpenMachine(name.into())));
    assert_eq!(requested, name);
    detail_loaded(state, seq, name, Ok(detail(name, with_xmrig)));
}

fn query(state: &AppState) -> Option<String> {
    state.href().query().map(str::to_string)
}

fn visible(state: &AppState) -> Vec<String> {
    state.modal.open.as_ref().unwrap().visible_keys().into_iter().collect()
}

fn network_error() -> Error {
    Error::network(BASE, "connection refused")
}

// ─────────────────────────────────────────────────────────
// Quit & keys
// ─────────────────────────────────────────────────────────

#[test]
fn test_quit_message_sets_quitting() {
    let mut state = state_at(BASE);
    assert!(!state.should_quit());

    update(&mut state, Message::Quit);

    assert!(state.should_quit());
}

#[test]
fn test_q_key_quits_on_dashboard() {
    let state = state_at(BASE);
    assert!(matches!(handle_key(&state, InputKey::Char('q')), Some(Message::Quit)));
}

#[test]
fn test_ctrl_c_quits_with_modal_open() {
    let mut state = state_at(BASE);
    load_roster(&mut state, fleet());
    open(&mut state, "node1", false);

    assert!(matches!(handle_key(&state, InputKey::CharCtrl('c')), Some(Message::Quit)));
}

#[test]
fn test_esc_closes_modal_instead_of_quitting() {
    let mut state = state_at(BASE);
    load_roster(&mut state, fleet());
    open(&mut state, "node1", false);

    assert!(matches!(handle_key(&state, InputKey::Esc), Some(Message::CloseModal)));
}

#[test]
fn test_refresh_key_disabled_while_fetching() {
    let mut state = state_at(BASE);
    update(&mut state, Message::Start);

    assert!(handle_key(&state, InputKey::Char('r')).is_none());
}

#[test]
fn test_arrow_keys_map_to_category_and_cursor() {
    let state = state_at(BASE);
    assert!(matches!(handle_key(&state, InputKey::Right), Some(Message::NextCategory)));
    assert!(matches!(handle_key(&state, InputKey::BackTab), Some(Message::PreviousCategory)));
    assert!(matches!(handle_key(&state, InputKey::Char('j')), Some(Message::CursorDown)));
    assert!(matches!(handle_key(&state, InputKey::Enter), Some(Message::OpenSelected)));
}

// ─────────────────────────────────────────────────────────
// Dashboard refresh cycle
// ─────────────────────────────────────────────────────────

#[test]
fn test_start_enters_loading() {
    let mut state = state_at(BASE);
    assert_eq!(state.dashboard.phase, DashboardPhase::Idle);

    let seq = expect_roster_fetch(update(&mut state, Message::Start));

    assert_eq!(seq, 1);
    assert_eq!(state.dashboard.phase, DashboardPhase::Loading);
    assert!(state.dashboard.is_fetching());
}

#[test]
fn test_tick_skipped_while_fetch_in_flight() {
    let mut state = state_at(BASE);
    update(&mut state, Message::Start);

    let result = update(&mut state, Message::RefreshTick);

    assert!(result.action.is_none());
}

#[test]
fn test_tick_refetches_after_render() {
    let mut state = state_at(BASE);
    load_roster(&mut state, fleet());

    let seq = expect_roster_fetch(update(&mut state, Message::RefreshTick));

    assert_eq!(seq, 2);
}

#[test]
fn test_default_category_is_first_ascending() {
    let mut state = state_at(BASE);
    let roster: MachineRoster = [summary("x", "b", true), summary("y", "a", true)]
        .into_iter()
        .collect();

    load_roster(&mut state, roster);

    assert_eq!(state.nav().category.as_deref(), Some("a"));
    assert_eq!(state.dashboard.categories, vec!["a", "b"]);
    assert_eq!(state.dashboard.selected_category(), Some("a"));
}

#[test]
fn test_existing_category_is_kept() {
    let mut state = state_at(&format!("{BASE}?c=B"));

    load_roster(&mut state, fleet());

    assert_eq!(query(&state).as_deref(), Some("c=B"));
    let grid = state.dashboard.grid.as_ref().unwrap();
    assert_eq!(grid.total_count, 2);
}

#[test]
fn test_rendered_grid_counts_online() {
    let mut state = state_at(BASE);

    load_roster(&mut state, fleet());

    assert_eq!(state.dashboard.phase, DashboardPhase::Rendered);
    let grid = state.dashboard.grid.as_ref().unwrap();
    assert_eq!(grid.category, "A");
    assert_eq!(grid.total_count, 3);
    assert_eq!(grid.online_count, 2);
}

#[test]
fn test_roster_success_requests_server_summary() {
    let mut state = state_at(BASE);

    let result = load_roster(&mut state, fleet());

    assert!(matches!(result.message, Some(Message::RequestServerSummary)));
    let follow_up = update(&mut state, Message::RequestServerSummary);
    assert_eq!(follow_up.action, Some(UpdateAction::FetchServerSummary));
}

#[test]
fn test_stale_roster_is_discarded() {
    let mut state = state_at(BASE);
    let first = expect_roster_fetch(update(&mut state, Message::Start));
    let newer: MachineRoster = [summary("fresh", "A", true)].into_iter().collect();
    roster_loaded(&mut state, first, Ok(newer));

    let second = expect_roster_fetch(update(&mut state, Message::Refresh));
    roster_loaded(&mut state, second, Ok(fleet()));
    assert_eq!(state.dashboard.last_applied_seq(), second);

    // A late answer for the first request changes nothing
    let old: MachineRoster = [summary("old", "A", true)].into_iter().collect();
    roster_loaded(&mut state, first, Ok(old));

    let grid = state.dashboard.grid.as_ref().unwrap();
    assert!(grid.position("old").is_none());
    assert_eq!(grid.total_count, 3);
}

#[test]
fn test_roster_failure_keeps_previous_grid() {
    let mut state = state_at(BASE);
    load_roster(&mut state, fleet());
    let before = state.dashboard.grid.clone();

    let seq = expect_roster_fetch(update(&mut state, Message::Refresh));
    roster_loaded(&mut state, seq, Err(network_error()));

    assert_eq!(state.dashboard.grid, before);
    assert_eq!(state.dashboard.phase, DashboardPhase::Rendered);
    assert_eq!(state.dashboard.notice.as_deref(), Some("API unreachable"));
    assert!(!state.dashboard.is_fetching());
}

#[test]
fn test_first_roster_failure_returns_to_idle() {
    let mut state = state_at(BASE);
    let seq = expect_roster_fetch(update(&mut state, Message::Start));

    roster_loaded(&mut state, seq, Err(Error::http(BASE, 500)));

    assert_eq!(state.dashboard.phase, DashboardPhase::Idle);
    assert!(state.dashboard.grid.is_none());
}

#[test]
fn test_success_clears_notice() {
    let mut state = state_at(BASE);
    let seq = expect_roster_fetch(update(&mut state, Message::Start));
    roster_loaded(&mut state, seq, Err(network_error()));
    assert!(state.dashboard.notice.is_some());

    load_roster(&mut state, fleet());

    assert!(state.dashboard.notice.is_none());
}

#[test]
fn test_select_category_writes_url_and_refetches() {
    let mut state = state_at(BASE);
    load_roster(&mut state, fleet());

    let result = update(&mut state, Message::SelectCategory("B".into()));

    assert_eq!(state.nav().category.as_deref(), Some("B"));
    assert_eq!(state.dashboard.selected_category(), Some("B"));
    assert_eq!(state.dashboard.cursor, 0);
    expect_roster_fetch(result);
}

#[test]
fn test_next_category_wraps() {
    let mut state = state_at(&format!("{BASE}?c=B"));
    load_roster(&mut state, fleet());

    let result = update(&mut state, Message::NextCategory);

    assert!(matches!(result.message, Some(Message::SelectCategory(c)) if c == "A"));
}

#[test]
fn test_cursor_clamps_to_grid() {
    let mut state = state_at(BASE);
    load_roster(&mut state, fleet());

    for _ in 0..10 {
        update(&mut state, Message::CursorDown);
    }
    assert_eq!(state.dashboard.cursor, 2);

    for _ in 0..10 {
        update(&mut state, Message::CursorUp);
    }
    assert_eq!(state.dashboard.cursor, 0);
}

#[test]
fn test_cursor_follows_machine_across_refresh() {
    let mut state = state_at(BASE);
    load_roster(&mut state, fleet());
    update(&mut state, Message::CursorDown);
    update(&mut state, Message::CursorDown);
    assert_eq!(state.dashboard.selected_cell().unwrap().name, "node3");

    let mut grown = fleet();
    grown.insert("node0", summary("node0", "A", true));
    load_roster(&mut state, grown);

    assert_eq!(state.dashboard.selected_cell().unwrap().name, "node3");
}

#[test]
fn test_open_selected_opens_cell_under_cursor() {
    let mut state = state_at(BASE);
    load_roster(&mut state, fleet());
    update(&mut state, Message::CursorDown);

    let result = update(&mut state, Message::OpenSelected);

    assert!(matches!(result.message, Some(Message::OpenMachine(n)) if n == "node2"));
}

#[test]
fn test_server_summary_failure_keeps_previous() {
    let mut state = state_at(BASE);
    let summary = fleetdash_core::ServerSummary {
        online_machines: 3,
        total_machines: 5,
        ..Default::default()
    };
    update(&mut state, Message::ServerSummaryLoaded(Ok(summary.clone())));

    update(&mut state, Message::ServerSummaryLoaded(Err(network_error())));

    assert_eq!(state.dashboard.server, Some(summary));
}

// ─────────────────────────────────────────────────────────
// Detail modal
// ─────────────────────────────────────────────────────────

#[test]
fn test_open_writes_machine_and_waits() {
    let mut state = state_at(&format!("{BASE}?c=A&mt=xmrig"));
    load_roster(&mut state, fleet());

    let (_, name) = expect_detail_fetch(update(&mut state, Message::OpenMachine("node1".into())));

    assert_eq!(name, "node1");
    assert_eq!(state.modal.phase(), ModalPhase::Opening);
    assert_eq!(query(&state).as_deref(), Some("c=A&mt=xmrig&m=node1"));
}

#[test]
fn test_detail_builds_stats_then_plugin_panels() {
    let mut state = state_at(BASE);
    load_roster(&mut state, fleet());

    open(&mut state, "node1", true);

    let modal = state.modal.open.as_ref().unwrap();
    let ids: Vec<_> = modal.panels.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec![BASIC_STATS_KEY, "xmrig"]);
    assert!(modal.panels.iter().all(|p| !p.visible));
    assert_eq!(state.modal.phase(), ModalPhase::Open);
}

#[test]
fn test_toggle_persists_panel_set() {
    let mut state = state_at(BASE);
    load_roster(&mut state, fleet());
    open(&mut state, "node1", true);

    update(&mut state, Message::TogglePanel("xmrig".into()));

    assert_eq!(visible(&state), vec!["xmrig"]);
    assert_eq!(
        state.nav().open_panels.into_iter().collect::<Vec<_>>(),
        vec!["xmrig"]
    );

    update(&mut state, Message::TogglePanel("xmrig".into()));
    assert!(state.nav().open_panels.is_empty());
    assert!(!state.href().as_str().contains("mt="));
}

#[test]
fn test_reload_with_url_restores_panels() {
    let mut state = state_at(BASE);
    load_roster(&mut state, fleet());
    open(&mut state, "node1", true);
    update(&mut state, Message::TogglePanel("xmrig".into()));
    let saved = state.href();

    // Start again from the saved URL
    let mut reloaded = state_at(saved.as_str());
    let result = load_roster(&mut reloaded, fleet());
    let (seq, name) = expect_detail_fetch(result);
    assert_eq!(name, "node1");
    detail_loaded(&mut reloaded, seq, &name, Ok(detail("node1", true)));

    assert_eq!(visible(&reloaded), vec!["xmrig"]);
    assert_eq!(reloaded.href(), saved);
}

#[test]
fn test_switching_machine_resets_panels() {
    let mut state = state_at(BASE);
    load_roster(&mut state, fleet());
    open(&mut state, "node1", true);
    update(&mut state, Message::TogglePanel("xmrig".into()));

    open(&mut state, "node2", true);

    assert!(visible(&state).is_empty());
    assert!(state.nav().open_panels.is_empty());
    assert_eq!(state.nav().open_machine.as_deref(), Some("node2"));
}

#[test]
fn test_refresh_keeps_panel_visibility() {
    let mut state = state_at(BASE);
    load_roster(&mut state, fleet());
    open(&mut state, "node1", true);
    update(&mut state, Message::TogglePanel(BASIC_STATS_KEY.into()));

    let (seq, name) = expect_detail_fetch(update(&mut state, Message::RefreshModal));
    detail_loaded(&mut state, seq, &name, Ok(detail("node1", true)));

    assert_eq!(visible(&state), vec![BASIC_STATS_KEY]);
}

#[test]
fn test_opening_same_machine_refreshes() {
    let mut state = state_at(BASE);
    load_roster(&mut state, fleet());
    open(&mut state, "node1", true);
    update(&mut state, Message::TogglePanel("xmrig".into()));

    let (seq, _) = expect_detail_fetch(update(&mut state, Message::OpenMachine("node1".into())));
    assert_eq!(state.modal.phase(), ModalPhase::Open);
    detail_loaded(&mut state, seq, "node1", Ok(detail("node1", true)));

    assert_eq!(visible(&state), vec!["xmrig"]);
}

#[test]
fn test_roster_refresh_refreshes_open_modal() {
    let mut state = state_at(BASE);
    load_roster(&mut state, fleet());
    open(&mut state, "node1", false);

    let result = load_roster(&mut state, fleet());

    let (_, name) = expect_detail_fetch(result);
    assert_eq!(name, "node1");
    assert_eq!(state.modal.phase(), ModalPhase::Open);
}

#[test]
fn test_open_failure_reverts_to_closed() {
    let mut state = state_at(BASE);
    load_roster(&mut state, fleet());

    let (seq, name) = expect_detail_fetch(update(&mut state, Message::OpenMachine("node1".into())));
    detail_loaded(&mut state, seq, &name, Err(Error::http(BASE, 404)));

    assert_eq!(state.modal.phase(), ModalPhase::Closed);
    assert!(state.nav().open_machine.is_none());
    assert!(state.modal.notice.as_deref().unwrap().contains("node1"));
}

#[test]
fn test_refresh_failure_keeps_modal() {
    let mut state = state_at(BASE);
    load_roster(&mut state, fleet());
    open(&mut state, "node1", true);

    let (seq, name) = expect_detail_fetch(update(&mut state, Message::RefreshModal));
    detail_loaded(&mut state, seq, &name, Err(network_error()));

    assert_eq!(state.modal.phase(), ModalPhase::Open);
    assert_eq!(state.nav().open_machine.as_deref(), Some("node1"));
    assert!(state.modal.notice.is_some());
}

#[test]
fn test_close_clears_machine_keeps_panels() {
    let mut state = state_at(BASE);
    load_roster(&mut state, fleet());
    open(&mut state, "node1", true);
    update(&mut state, Message::TogglePanel("xmrig".into()));

    update(&mut state, Message::CloseModal);

    assert_eq!(state.modal.phase(), ModalPhase::Closed);
    let nav = state.nav();
    assert!(nav.open_machine.is_none());
    assert!(nav.open_panels.contains("xmrig"));
}

#[test]
fn test_reopen_after_close_restores_panels() {
    let mut state = state_at(BASE);
    load_roster(&mut state, fleet());
    open(&mut state, "node1", true);
    update(&mut state, Message::TogglePanel("xmrig".into()));
    update(&mut state, Message::CloseModal);
    assert_eq!(query(&state).as_deref(), Some("c=A&mt=xmrig"));

    open(&mut state, "node1", true);

    assert_eq!(visible(&state), vec!["xmrig"]);
    assert_eq!(query(&state).as_deref(), Some("c=A&mt=xmrig&m=node1"));
}

#[test]
fn test_open_from_dashboard_uses_url_panels() {
    let mut state = state_at(&format!("{BASE}?c=A&mt=xmrig"));
    load_roster(&mut state, fleet());
    assert_eq!(state.modal.phase(), ModalPhase::Closed);

    open(&mut state, "node1", true);

    assert_eq!(visible(&state), vec!["xmrig"]);
    assert_eq!(state.nav().open_machine.as_deref(), Some("node1"));
}

#[test]
fn test_switch_while_opening_drops_panels() {
    let mut state = state_at(&format!("{BASE}?c=A&mt=xmrig"));
    load_roster(&mut state, fleet());
    expect_detail_fetch(update(&mut state, Message::OpenMachine("node1".into())));

    open(&mut state, "node2", true);

    assert!(visible(&state).is_empty());
    assert!(state.nav().open_panels.is_empty());
}

#[test]
fn test_response_after_close_is_discarded() {
    let mut state = state_at(BASE);
    load_roster(&mut state, fleet());
    let (seq, name) = expect_detail_fetch(update(&mut state, Message::OpenMachine("node1".into())));
    update(&mut state, Message::CloseModal);

    detail_loaded(&mut state, seq, &name, Ok(detail("node1", false)));

    assert_eq!(state.modal.phase(), ModalPhase::Closed);
}

#[test]
fn test_stale_detail_for_previous_machine_is_discarded() {
    let mut state = state_at(BASE);
    load_roster(&mut state, fleet());
    let (first, _) = expect_detail_fetch(update(&mut state, Message::OpenMachine("node1".into())));
    let (second, _) = expect_detail_fetch(update(&mut state, Message::OpenMachine("node2".into())));

    detail_loaded(&mut state, first, "node1", Ok(detail("node1", false)));
    assert_eq!(state.modal.phase(), ModalPhase::Opening);

    detail_loaded(&mut state, second, "node2", Ok(detail("node2", false)));
    assert!(state.modal.is_open_for("node2"));
}

#[test]
fn test_deep_link_to_unknown_machine_does_nothing() {
    let mut state = state_at(&format!("{BASE}?c=A&m=ghost"));

    let result = load_roster(&mut state, fleet());

    assert!(result.action.is_none());
    assert_eq!(state.modal.phase(), ModalPhase::Closed);
    assert_eq!(state.nav().open_machine.as_deref(), Some("ghost"));
}

#[test]
fn test_toggle_preserves_keys_of_absent_panels() {
    let mut state = state_at(&format!("{BASE}?c=A&m=node1&mt=xmrig"));
    let (seq, name) = expect_detail_fetch(load_roster(&mut state, fleet()));
    // No xmrig payload on this fetch
    detail_loaded(&mut state, seq, &name, Ok(detail("node1", false)));

    update(&mut state, Message::TogglePanel(BASIC_STATS_KEY.into()));

    let panels = state.nav().open_panels;
    assert!(panels.contains("xmrig"));
    assert!(panels.contains(BASIC_STATS_KEY));
}

#[test]
fn test_panel_cursor_toggles_selected() {
    let mut state = state_at(BASE);
    load_roster(&mut state, fleet());
    open(&mut state, "node1", true);

    update(&mut state, Message::PanelDown);
    update(&mut state, Message::PanelDown);
    let result = update(&mut state, Message::ToggleSelectedPanel);

    assert!(matches!(result.message, Some(Message::TogglePanel(k)) if k == "xmrig"));
}
