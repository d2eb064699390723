//! Plugin payloads attached to a machine's detail record
//!
//! The detail endpoint folds every plugin's output into the machine's `data`
//! object next to `online` and `stats`. Everything that is not one of those
//! two keys lands in [`Extras`], keyed by the plugin name, and is only
//! interpreted on demand by [`ExtraPayload::parse`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::loose;

/// Extras key the xmrig miner plugin reports under
pub const XMRIG_KEY: &str = "xmrig";

/// Marker the monitoring client sends when it could not reach the miner
const XMRIG_FAILED: &str = "failed";

/// Raw plugin payloads, keyed by plugin name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Extras(BTreeMap<String, Value>);

impl Extras {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse the payload stored under `key`, if any.
    pub fn payload(&self, key: &str) -> Option<Result<ExtraPayload>> {
        self.get(key).map(|value| ExtraPayload::parse(key, value))
    }

    /// Every entry as a typed payload, in key order.
    pub fn payloads(&self) -> impl Iterator<Item = (&str, Result<ExtraPayload>)> + '_ {
        self.0
            .iter()
            .map(|(key, value)| (key.as_str(), ExtraPayload::parse(key, value)))
    }
}

impl FromIterator<(String, Value)> for Extras {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A typed view of one extras entry
#[derive(Debug, Clone, PartialEq)]
pub enum ExtraPayload {
    Xmrig(XmrigStatus),
    /// A plugin this build has no decoder for
    Unknown { key: String },
}

impl ExtraPayload {
    pub fn parse(key: &str, value: &Value) -> Result<Self> {
        match key {
            XMRIG_KEY => XmrigStatus::from_value(value).map(ExtraPayload::Xmrig),
            other => Ok(ExtraPayload::Unknown {
                key: other.to_string(),
            }),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// xmrig
// ─────────────────────────────────────────────────────────────────

/// What the monitoring client knows about the local xmrig miner
#[derive(Debug, Clone, PartialEq)]
pub enum XmrigStatus {
    Report(XmrigReport),
    /// The client could not query the miner's HTTP API
    Failed,
}

impl XmrigStatus {
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) if s == XMRIG_FAILED => Ok(XmrigStatus::Failed),
            Value::Object(_) => serde_json::from_value(value.clone())
                .map(XmrigStatus::Report)
                .map_err(|e| Error::plugin(XMRIG_KEY, e.to_string())),
            other => Err(Error::plugin(
                XMRIG_KEY,
                format!("unexpected payload: {other}"),
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct XmrigReport {
    #[serde(default)]
    pub hashrate: Hashrate,
    #[serde(default)]
    pub worker_id: Option<String>,
    /// Seconds since the miner started
    #[serde(default, deserialize_with = "loose::f64_opt")]
    pub uptime: Option<f64>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub shares: Shares,
}

/// Hashes per second over three windows
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Hashrate {
    #[serde(default, deserialize_with = "loose::f64_opt")]
    pub current: Option<f64>,
    #[serde(rename = "1m", default, deserialize_with = "loose::f64_opt")]
    pub one_minute: Option<f64>,
    #[serde(rename = "15m", default, deserialize_with = "loose::f64_opt")]
    pub fifteen_minutes: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Shares {
    #[serde(default, deserialize_with = "loose::u64_opt")]
    pub total: Option<u64>,
    #[serde(default, deserialize_with = "loose::u64_opt")]
    pub good: Option<u64>,
    #[serde(default, deserialize_with = "loose::f64_opt")]
    pub avg_time_ms: Option<f64>,
    #[serde(default, deserialize_with = "loose::u64_opt")]
    pub hashes_total: Option<u64>,
}

impl Shares {
    /// Rejected shares; `None` unless both counts are known.
    pub fn bad(&self) -> Option<u64> {
        Some(self.total?.saturating_sub(self.good?))
    }

    /// Percentage of accepted shares, one decimal. `None` when no shares were submitted.
    pub fn percent_good(&self) -> Option<f64> {
        crate::stats::percent_used(self.good, self.total)
    }
}
