//! fleetdash-app - Application state and orchestration for fleetdash
//!
//! This crate implements the TEA (The Elm Architecture) pattern for the
//! dashboard and detail modal, the URL state store that persists navigation,
//! the plugin registry, the Engine that owns the message loop and refresh
//! timer, and configuration loading.

pub mod actions;
pub mod config;
pub mod engine;
pub mod engine_event;
pub mod grid;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod panel;
pub mod plugins;
pub mod process;
pub mod signals;
pub mod state;
pub mod url_state;

// Re-export primary types
pub use engine::Engine;
pub use engine_event::EngineEvent;
pub use grid::{CellStats, GridCell, GridView, Reading};
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::Message;
pub use panel::{Panel, PanelContent, PanelField, PanelSection, BASIC_STATS_KEY};
pub use plugins::{plugin_render_in_progress, PluginRegistry, TelemetryPlugin};
pub use state::{AppState, DashboardPhase, ModalPhase, OpenModal};
pub use url_state::{resolve_location, Location, MemoryLocation, NavPatch, NavState, UrlStateStore};
