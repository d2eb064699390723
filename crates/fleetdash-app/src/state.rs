//! Application state (Model in TEA pattern)

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Local};
use fleetdash_core::{MachineDetail, MachineRoster, ServerSummary};
use url::Url;

use crate::config::Settings;
use crate::grid::{GridCell, GridView};
use crate::panel::Panel;
use crate::plugins::PluginRegistry;
use crate::url_state::{Location, NavState, UrlStateStore};

// ─────────────────────────────────────────────────────────────────
// Dashboard
// ─────────────────────────────────────────────────────────────────

/// Dashboard render cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardPhase {
    /// Nothing rendered yet
    #[default]
    Idle,
    /// A roster fetch is in flight
    Loading,
    /// A grid is on screen
    Rendered,
}

#[derive(Debug, Default)]
pub struct DashboardState {
    pub phase: DashboardPhase,

    /// Snapshot the grid was built from
    pub roster: Option<MachineRoster>,

    /// Distinct categories of `roster`, ascending
    pub categories: Vec<String>,

    pub grid: Option<GridView>,

    /// Index into `grid.cells`
    pub cursor: usize,

    /// Last fetch failure, cleared by the next success
    pub notice: Option<String>,

    pub server: Option<ServerSummary>,

    pub refreshed_at: Option<DateTime<Local>>,

    next_seq: u64,
    in_flight: Option<u64>,
    last_applied: u64,
}

impl DashboardState {
    /// True while a roster fetch is outstanding; refresh is disabled meanwhile.
    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Sequence number of the newest roster that was rendered
    pub fn last_applied_seq(&self) -> u64 {
        self.last_applied
    }

    pub(crate) fn begin_fetch(&mut self) -> u64 {
        self.next_seq += 1;
        self.in_flight = Some(self.next_seq);
        self.phase = DashboardPhase::Loading;
        self.next_seq
    }

    /// Settle the fetch `seq`. Returns false for a response older than the
    /// last applied one.
    pub(crate) fn settle(&mut self, seq: u64) -> bool {
        if self.in_flight == Some(seq) {
            self.in_flight = None;
        }
        if seq <= self.last_applied {
            return false;
        }
        if self.in_flight.is_none() {
            self.phase = if self.grid.is_some() {
                DashboardPhase::Rendered
            } else {
                DashboardPhase::Idle
            };
        }
        true
    }

    pub(crate) fn mark_applied(&mut self, seq: u64) {
        self.last_applied = seq;
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.grid.as_ref().map(|g| g.category.as_str())
    }

    pub fn selected_cell(&self) -> Option<&GridCell> {
        self.grid.as_ref().and_then(|g| g.cells.get(self.cursor))
    }
}

// ─────────────────────────────────────────────────────────────────
// Detail modal
// ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    Closed,
    /// First fetch for a machine is in flight
    Opening,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailRequest {
    /// Open a machine; panel visibility comes from the URL
    Open,
    /// Re-fetch the open machine; panel visibility carries over
    Refresh,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDetail {
    pub seq: u64,
    pub name: String,
    pub kind: DetailRequest,
}

/// The modal currently on screen
#[derive(Debug, Clone)]
pub struct OpenModal {
    pub name: String,
    pub detail: MachineDetail,
    /// Built-in stats first, then plugin panels in registry order
    pub panels: Vec<Panel>,
    /// Index of the highlighted panel toggle
    pub selected: usize,
}

impl OpenModal {
    pub fn panel(&self, key: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id == key)
    }

    pub fn panel_keys(&self) -> BTreeSet<String> {
        self.panels.iter().map(|p| p.id.clone()).collect()
    }

    pub fn visible_keys(&self) -> BTreeSet<String> {
        self.panels
            .iter()
            .filter(|p| p.visible)
            .map(|p| p.id.clone())
            .collect()
    }

    pub fn selected_panel(&self) -> Option<&Panel> {
        self.panels.get(self.selected)
    }
}

#[derive(Debug, Default)]
pub struct ModalState {
    pub open: Option<OpenModal>,
    pub pending: Option<PendingDetail>,
    /// Last open/refresh failure
    pub notice: Option<String>,
    next_seq: u64,
}

impl ModalState {
    pub fn phase(&self) -> ModalPhase {
        match (&self.open, &self.pending) {
            (Some(_), _) => ModalPhase::Open,
            (None, Some(_)) => ModalPhase::Opening,
            (None, None) => ModalPhase::Closed,
        }
    }

    pub fn is_open_for(&self, name: &str) -> bool {
        self.open.as_ref().is_some_and(|m| m.name == name)
    }

    pub fn is_pending_for(&self, name: &str) -> bool {
        self.pending.as_ref().is_some_and(|p| p.name == name)
    }

    pub(crate) fn begin_fetch(&mut self, name: &str, kind: DetailRequest) -> u64 {
        self.next_seq += 1;
        self.pending = Some(PendingDetail {
            seq: self.next_seq,
            name: name.to_string(),
            kind,
        });
        self.next_seq
    }

    /// Take the pending request if `seq` is the one awaited.
    pub(crate) fn settle(&mut self, seq: u64) -> Option<PendingDetail> {
        match &self.pending {
            Some(p) if p.seq == seq => self.pending.take(),
            _ => None,
        }
    }

    pub(crate) fn close(&mut self) {
        self.open = None;
        self.pending = None;
        self.notice = None;
    }
}

// ─────────────────────────────────────────────────────────────────
// AppState
// ─────────────────────────────────────────────────────────────────

/// Complete application state (the Model in TEA)
#[derive(Debug)]
pub struct AppState {
    pub settings: Settings,

    /// The persisted navigation state
    pub url: UrlStateStore,

    /// Registered plugins, shared read-only
    pub registry: Arc<PluginRegistry>,

    pub dashboard: DashboardState,

    pub modal: ModalState,

    quitting: bool,
}

impl AppState {
    pub fn new(settings: Settings, location: Box<dyn Location>, registry: Arc<PluginRegistry>) -> Self {
        Self {
            settings,
            url: UrlStateStore::new(location),
            registry,
            dashboard: DashboardState::default(),
            modal: ModalState::default(),
            quitting: false,
        }
    }

    pub fn nav(&self) -> NavState {
        self.url.read()
    }

    pub fn href(&self) -> Url {
        self.url.href()
    }

    pub fn request_quit(&mut self) {
        self.quitting = true;
    }

    pub fn should_quit(&self) -> bool {
        self.quitting
    }
}
