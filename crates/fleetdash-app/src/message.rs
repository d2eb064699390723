//! Message types for the application (TEA pattern)

use chrono::{DateTime, Local};
use fleetdash_core::{MachineDetail, MachineRoster, Result, ServerSummary};

use crate::input_key::InputKey;

/// All possible messages/actions in the application
#[derive(Debug)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Quit the application
    Quit,

    // ─────────────────────────────────────────────────────────
    // Dashboard
    // ─────────────────────────────────────────────────────────
    /// Initial load
    Start,

    /// Periodic refresh timer fired
    RefreshTick,

    /// Manual refresh of the roster
    Refresh,

    /// Select a category and re-render
    SelectCategory(String),

    NextCategory,
    PreviousCategory,
    CursorUp,
    CursorDown,

    /// Open the machine under the grid cursor
    OpenSelected,

    /// A roster fetch finished
    RosterLoaded {
        seq: u64,
        result: Result<MachineRoster>,
        received_at: DateTime<Local>,
    },

    /// Ask for the server summary shown in the header
    RequestServerSummary,

    ServerSummaryLoaded(Result<ServerSummary>),

    // ─────────────────────────────────────────────────────────
    // Detail modal
    // ─────────────────────────────────────────────────────────
    /// Open a machine's detail view (user action)
    OpenMachine(String),

    /// Flip one panel's visibility
    TogglePanel(String),

    PanelUp,
    PanelDown,

    /// Toggle the panel under the modal cursor
    ToggleSelectedPanel,

    /// Re-fetch the open machine, keeping expanded panels
    RefreshModal,

    CloseModal,

    /// A detail fetch finished; `fetched_at` is unix seconds
    DetailLoaded {
        seq: u64,
        name: String,
        result: Result<MachineDetail>,
        fetched_at: f64,
    },
}
