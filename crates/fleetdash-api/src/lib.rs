//! # fleetdash-api - Telemetry Client
//!
//! Async access to the fleet monitoring API. The [`TelemetrySource`] trait is
//! the seam the controllers depend on; [`HttpTelemetryClient`] is the real
//! implementation and `fake::FakeTelemetry` (feature `test-helpers`) an
//! in-memory one for tests.
//!
//! Every call is a fresh request. Failures come back as
//! [`fleetdash_core::Error`] values (`Network`, `Http`, `Parse`); nothing
//! panics past this boundary.

pub mod client;
pub mod encode;
pub mod source;

#[cfg(any(test, feature = "test-helpers"))]
pub mod fake;

pub use client::HttpTelemetryClient;
pub use encode::encode_machine_name;
pub use source::{LocalTelemetrySource, TelemetrySource};
