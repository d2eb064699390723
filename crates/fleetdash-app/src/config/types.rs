//! Configuration types for fleetdash
//!
//! Defines:
//! - `Settings` - Global application settings
//! - `ApiSettings`, `DashboardSettings`, `UiSettings` - Per-section settings

use std::time::Duration;

use fleetdash_core::prelude::*;
use serde::{Deserialize, Serialize};
use url::Url;

/// Global settings from `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub dashboard: DashboardSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

impl Settings {
    /// Check values that would make the dashboard unusable.
    pub fn validate(&self) -> Result<()> {
        if self.dashboard.refresh_interval_secs == 0 {
            return Err(Error::config("dashboard.refresh_interval_secs must be at least 1"));
        }
        if self.api.timeout_ms == 0 {
            return Err(Error::config("api.timeout_ms must be at least 1"));
        }
        Url::parse(&self.api.base_url)
            .map_err(|e| Error::config(format!("api.base_url '{}': {}", self.api.base_url, e)))?;
        Url::parse(&self.dashboard.location).map_err(|e| {
            Error::invalid_location(&self.dashboard.location, e.to_string())
        })?;
        Ok(())
    }
}

/// Remote API settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ApiSettings {
    /// Root of the monitoring API, e.g. `http://localhost:8080/api`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

/// Dashboard behavior settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DashboardSettings {
    /// Location used when none is given on the command line
    #[serde(default = "default_location")]
    pub location: String,

    /// Seconds between roster refreshes
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            location: default_location(),
            refresh_interval_secs: default_refresh_interval(),
        }
    }
}

impl DashboardSettings {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }
}

fn default_location() -> String {
    "http://localhost:8080/machines".to_string()
}

fn default_refresh_interval() -> u64 {
    60
}

/// UI settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UiSettings {
    /// Show the live location in the status bar
    #[serde(default = "default_true")]
    pub show_url: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self { show_url: true }
    }
}

fn default_true() -> bool {
    true
}
