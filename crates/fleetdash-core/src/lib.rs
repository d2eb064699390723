//! # fleetdash-core - Core Domain Types
//!
//! Foundation crate for fleetdash. Provides the telemetry domain types,
//! error handling, logging setup, and the formatting and severity policies
//! shared by the view and the controllers.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, serde_json, chrono, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`MachineRoster`] - Every monitored machine, keyed by unique name
//! - [`MachineSummary`] - Category, online flag, and stats of one roster entry
//! - [`MachineDetail`] - A single machine's full record including plugin extras
//! - [`StatsReport`] - Stats as reported, or the "invalid stats" marker
//! - [`AuxLists`], [`ServerSummary`] - Supporting endpoint payloads
//!
//! ### Extras (`extras`)
//! - [`Extras`] - Raw plugin payloads keyed by plugin name
//! - [`ExtraPayload`] - Typed view of one entry, with an `Unknown` fallback
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ### Presentation policy (`stats`, `format`)
//! - [`Severity`] - Normal / warning / danger tiers for usage percentages
//! - [`format_bytes()`], [`format_hashes_per_second()`], [`format_duration()`]
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use fleetdash_core::prelude::*;
//! ```

pub mod error;
pub mod extras;
pub mod format;
pub mod logging;
mod loose;
pub mod stats;
pub mod types;

/// Prelude for common imports used throughout all fleetdash crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result, ResultExt};
pub use extras::{ExtraPayload, Extras, Hashrate, Shares, XmrigReport, XmrigStatus, XMRIG_KEY};
pub use format::{format_bytes, format_duration, format_hashes_per_second, format_human};
pub use stats::{percent_used, round_one_decimal, Severity, DANGER_PERCENT, WARNING_PERCENT};
pub use types::{
    AuxLists, Internet, LoadAverage, MachineDetail, MachineRoster, MachineStats, MachineSummary,
    ServerSummary, StatsReport, Throughput, Usage, INVALID_STATS,
};
