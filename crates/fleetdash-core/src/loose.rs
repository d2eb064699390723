//! Lenient number decoding for telemetry fields.
//!
//! Monitoring clients report numbers inconsistently: load averages arrive as
//! strings straight out of `/proc/loadavg`, byte counts as floats, missing
//! readings as `null`. These helpers accept any of those and map garbage to
//! `None` instead of failing the whole document.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Float(f64),
    Text(String),
    Other(serde_json::Value),
}

impl LooseNumber {
    fn into_f64(self) -> Option<f64> {
        match self {
            LooseNumber::Float(v) if v.is_finite() => Some(v),
            LooseNumber::Float(_) => None,
            LooseNumber::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            LooseNumber::Other(_) => None,
        }
    }
}

/// Decode an optional float from a number, numeric string, or anything else (→ `None`).
pub fn f64_opt<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<LooseNumber>::deserialize(deserializer)?;
    Ok(raw.and_then(LooseNumber::into_f64))
}

/// Decode an optional non-negative integer; floats are truncated.
pub fn u64_opt<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64_opt(deserializer)?;
    Ok(value.filter(|v| *v >= 0.0).map(|v| v.trunc() as u64))
}
