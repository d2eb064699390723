//! In-memory telemetry source for tests
//!
//! Cloning a [`FakeTelemetry`] shares its state, so a test can keep one
//! handle and reshape the fleet while an engine owns another.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use fleetdash_core::{
    AuxLists, Error, MachineDetail, MachineRoster, MachineSummary, Result, ServerSummary,
};

use crate::source::TelemetrySource;

const FAKE_URL: &str = "fake://telemetry";

#[derive(Debug, Default)]
struct FakeState {
    roster: MachineRoster,
    details: BTreeMap<String, MachineDetail>,
    aux: AuxLists,
    fail_roster: bool,
    fail_details: HashSet<String>,
    roster_calls: usize,
    detail_calls: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FakeTelemetry {
    state: Arc<Mutex<FakeState>>,
}

impl FakeTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        // A panicking test thread must not wedge the others
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Replace the roster and derive a detail record for every machine.
    pub fn set_roster(&self, roster: MachineRoster) {
        let mut state = self.lock();
        for summary in roster.iter() {
            state
                .details
                .entry(summary.name.clone())
                .or_insert_with(|| detail_from_summary(summary));
        }
        state.roster = roster;
    }

    pub fn with_roster(self, roster: MachineRoster) -> Self {
        self.set_roster(roster);
        self
    }

    /// Store (or replace) the detail record served for `detail.name`.
    pub fn insert_detail(&self, detail: MachineDetail) {
        self.lock().details.insert(detail.name.clone(), detail);
    }

    pub fn set_aux_lists(&self, aux: AuxLists) {
        self.lock().aux = aux;
    }

    pub fn fail_roster(&self, fail: bool) {
        self.lock().fail_roster = fail;
    }

    pub fn fail_detail(&self, name: &str, fail: bool) {
        let mut state = self.lock();
        if fail {
            state.fail_details.insert(name.to_string());
        } else {
            state.fail_details.remove(name);
        }
    }

    pub fn roster_calls(&self) -> usize {
        self.lock().roster_calls
    }

    /// Machine names requested so far, in call order
    pub fn detail_calls(&self) -> Vec<String> {
        self.lock().detail_calls.clone()
    }
}

fn detail_from_summary(summary: &MachineSummary) -> MachineDetail {
    MachineDetail {
        name: summary.name.clone(),
        category: summary.category.clone(),
        online: summary.online,
        stats: summary.stats.clone(),
        extras: Default::default(),
    }
}

impl TelemetrySource for FakeTelemetry {
    async fn fetch_roster(&self) -> Result<MachineRoster> {
        let mut state = self.lock();
        state.roster_calls += 1;
        if state.fail_roster {
            return Err(Error::network(FAKE_URL, "connection refused"));
        }
        Ok(state.roster.clone())
    }

    async fn fetch_machine_detail(&self, name: &str) -> Result<MachineDetail> {
        let mut state = self.lock();
        state.detail_calls.push(name.to_string());
        if state.fail_details.contains(name) {
            return Err(Error::network(FAKE_URL, "connection refused"));
        }
        state
            .details
            .get(name)
            .cloned()
            .ok_or_else(|| Error::http(format!("{FAKE_URL}/{name}"), 404))
    }

    async fn fetch_aux_lists(&self) -> Result<AuxLists> {
        Ok(self.lock().aux.clone())
    }

    async fn fetch_server_summary(&self) -> Result<ServerSummary> {
        let state = self.lock();
        Ok(ServerSummary {
            online_machines: state.roster.iter().filter(|m| m.online).count() as u64,
            total_machines: state.roster.len() as u64,
            frontend_version: env!("CARGO_PKG_VERSION").to_string(),
            api_version: env!("CARGO_PKG_VERSION").to_string(),
            db_size: None,
        })
    }
}
