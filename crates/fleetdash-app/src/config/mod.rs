//! Configuration file parsing for fleetdash
//!
//! Supports:
//! - `<config_dir>/fleetdash/config.toml` - Global settings
//! - `--config PATH` - An explicit settings file

pub mod settings;
pub mod types;

pub use settings::{default_config_path, load_settings, load_settings_from};
pub use types::*;
