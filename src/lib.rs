//! fleetdash - Terminal dashboard for a fleet of monitored machines
//!
//! The binary is a thin wrapper; startup wiring lives here so it can be
//! exercised without a terminal.

pub mod app;
pub mod cli;

pub use app::{build_engine, initial_location, resolve_settings, run};
pub use cli::Args;
