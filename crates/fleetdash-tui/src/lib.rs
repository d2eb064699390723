//! fleetdash-tui - Terminal UI for fleetdash
//!
//! Renders the Engine's state with ratatui and feeds terminal key events
//! back into it.

pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

pub use runner::run;
