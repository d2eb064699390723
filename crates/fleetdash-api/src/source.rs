//! The telemetry source abstraction

use fleetdash_core::{AuxLists, MachineDetail, MachineRoster, Result, ServerSummary};

/// Read-only access to the remote telemetry API
#[trait_variant::make(TelemetrySource: Send)]
pub trait LocalTelemetrySource {
    /// Fetch every machine's summary
    async fn fetch_roster(&self) -> Result<MachineRoster>;

    /// Fetch one machine by exact name
    async fn fetch_machine_detail(&self, name: &str) -> Result<MachineDetail>;

    /// Fetch the plugin and script tag lists used by the config editor
    async fn fetch_aux_lists(&self) -> Result<AuxLists>;

    /// Fetch server-wide counters and versions
    async fn fetch_server_summary(&self) -> Result<ServerSummary>;
}
