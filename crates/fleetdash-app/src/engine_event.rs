//! Events emitted by the Engine for external consumers
//!
//! Broadcast after each message processing cycle via `Engine::subscribe()`,
//! so subscribers see a consistent view of state changes.

use url::Url;

use crate::state::DashboardPhase;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// The persisted location changed
    LocationChanged { href: Url },

    /// The dashboard moved between Idle, Loading and Rendered
    DashboardPhaseChanged {
        old_phase: DashboardPhase,
        new_phase: DashboardPhase,
    },

    /// A roster snapshot was applied to the grid
    RosterApplied { seq: u64 },

    /// The detail modal now shows `name`
    ModalOpened { name: String },

    ModalClosed,

    /// The engine is shutting down
    Shutdown,
}
