//! Core domain types for machine telemetry

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::extras::Extras;
use crate::loose;
use crate::stats;

/// Sentinel the API sends in place of a stats object
pub const INVALID_STATS: &str = "invalid stats";

// ─────────────────────────────────────────────────────────────────
// Stats
// ─────────────────────────────────────────────────────────────────

/// Load average over three windows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadAverage {
    #[serde(rename = "1m", default, deserialize_with = "loose::f64_opt")]
    pub one: Option<f64>,
    #[serde(rename = "5m", default, deserialize_with = "loose::f64_opt")]
    pub five: Option<f64>,
    #[serde(rename = "15m", default, deserialize_with = "loose::f64_opt")]
    pub fifteen: Option<f64>,
}

/// Byte usage of a memory or storage pool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default, deserialize_with = "loose::u64_opt")]
    pub used: Option<u64>,
    #[serde(default, deserialize_with = "loose::u64_opt")]
    pub free: Option<u64>,
    #[serde(default, deserialize_with = "loose::u64_opt")]
    pub total: Option<u64>,
}

impl Usage {
    pub fn new(used: u64, total: u64) -> Self {
        Self {
            used: Some(used),
            free: Some(total.saturating_sub(used)),
            total: Some(total),
        }
    }

    /// Used percentage rounded to one decimal; `None` for a zero or unknown total.
    pub fn percent(&self) -> Option<f64> {
        stats::percent_used(self.used, self.total)
    }
}

/// Bytes per second in each direction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Throughput {
    #[serde(default, deserialize_with = "loose::f64_opt")]
    pub incoming: Option<f64>,
    #[serde(default, deserialize_with = "loose::f64_opt")]
    pub outgoing: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Internet {
    #[serde(default)]
    pub current: Option<Throughput>,
    #[serde(rename = "5m", default)]
    pub five_minutes: Option<Throughput>,
}

/// A machine's resource readings. Every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MachineStats {
    #[serde(default)]
    pub cpu: Option<LoadAverage>,
    #[serde(default)]
    pub ram: Option<Usage>,
    #[serde(default)]
    pub disk: Option<Usage>,
    /// Unix timestamp (seconds) of the last boot
    #[serde(default, deserialize_with = "loose::f64_opt")]
    pub boot_time: Option<f64>,
    #[serde(default)]
    pub internet: Option<Internet>,
}

impl MachineStats {
    pub fn cpu_one_minute(&self) -> Option<f64> {
        self.cpu.as_ref().and_then(|c| c.one)
    }

    pub fn ram_percent(&self) -> Option<f64> {
        self.ram.as_ref().and_then(Usage::percent)
    }

    pub fn disk_percent(&self) -> Option<f64> {
        self.disk.as_ref().and_then(Usage::percent)
    }

    /// Seconds since boot relative to `now` (unix seconds)
    pub fn uptime_secs(&self, now: f64) -> Option<f64> {
        self.boot_time.map(|boot| (now - boot).max(0.0))
    }
}

/// Stats as reported, or the API's "invalid stats" marker.
///
/// Anything that is not a stats object (the marker string, `null`, a
/// malformed object) decodes to `Invalid` so one bad machine never fails a
/// whole roster.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum StatsReport {
    Valid(MachineStats),
    #[default]
    Invalid,
}

impl StatsReport {
    pub fn valid(&self) -> Option<&MachineStats> {
        match self {
            StatsReport::Valid(stats) => Some(stats),
            StatsReport::Invalid => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, StatsReport::Valid(_))
    }

    fn from_value(value: Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value)
                .map(StatsReport::Valid)
                .unwrap_or(StatsReport::Invalid),
            _ => StatsReport::Invalid,
        }
    }

    fn to_value(&self) -> Value {
        match self {
            StatsReport::Valid(stats) => {
                serde_json::to_value(stats).unwrap_or_else(|_| Value::String(INVALID_STATS.into()))
            }
            StatsReport::Invalid => Value::String(INVALID_STATS.into()),
        }
    }
}

impl<'de> Deserialize<'de> for StatsReport {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(StatsReport::from_value)
    }
}

impl Serialize for StatsReport {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

// ─────────────────────────────────────────────────────────────────
// Wire envelope shared by roster entries and detail records
// ─────────────────────────────────────────────────────────────────

/// Wire envelope: `{ "name", "category", "data": {...} | "invalid stats" }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireMachine {
    #[serde(default)]
    name: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    data: Value,
}

/// The pieces of `data`: online flag, stats, and whatever plugins added.
struct MachineData {
    online: bool,
    stats: StatsReport,
    extras: Extras,
}

impl MachineData {
    fn split(data: Value) -> Self {
        let Value::Object(mut map) = data else {
            return Self {
                online: false,
                stats: StatsReport::Invalid,
                extras: Extras::new(),
            };
        };
        let online = map
            .remove("online")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        let stats = map
            .remove("stats")
            .map(StatsReport::from_value)
            .unwrap_or_default();
        Self {
            online,
            stats,
            extras: map.into_iter().collect(),
        }
    }

    fn join(online: bool, stats: &StatsReport, extras: &Extras) -> Value {
        let mut map = Map::new();
        map.insert("online".into(), Value::Bool(online));
        map.insert("stats".into(), stats.to_value());
        for key in extras.keys() {
            if let Some(value) = extras.get(key) {
                map.insert(key.to_string(), value.clone());
            }
        }
        Value::Object(map)
    }
}

// ─────────────────────────────────────────────────────────────────
// Roster
// ─────────────────────────────────────────────────────────────────

/// One roster entry; the machine name is the roster key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireMachine", into = "WireMachine")]
pub struct MachineSummary {
    pub name: String,
    pub category: String,
    pub online: bool,
    pub stats: StatsReport,
}

impl From<WireMachine> for MachineSummary {
    fn from(wire: WireMachine) -> Self {
        let data = MachineData::split(wire.data);
        Self {
            name: wire.name,
            category: wire.category,
            online: data.online,
            stats: data.stats,
        }
    }
}

impl From<MachineSummary> for WireMachine {
    fn from(summary: MachineSummary) -> Self {
        let data = MachineData::join(summary.online, &summary.stats, &Extras::new());
        Self {
            name: summary.name,
            category: summary.category,
            data,
        }
    }
}

/// Every monitored machine keyed by unique name.
///
/// Always replaced wholesale; iteration is in name order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MachineRoster {
    machines: BTreeMap<String, MachineSummary>,
}

impl MachineRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a machine under its own name, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, mut summary: MachineSummary) {
        let name = name.into();
        summary.name = name.clone();
        self.machines.insert(name, summary);
    }

    pub fn get(&self, name: &str) -> Option<&MachineSummary> {
        self.machines.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.machines.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.machines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }

    /// Machines in name order
    pub fn iter(&self) -> impl Iterator<Item = &MachineSummary> {
        self.machines.values()
    }

    /// Distinct categories, sorted ascending (byte-lexical, case-sensitive).
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self.iter().map(|m| m.category.clone()).collect();
        categories.sort();
        categories.dedup();
        categories
    }

    /// Machines of one category, in name order.
    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a MachineSummary> {
        self.iter().filter(move |m| m.category == category)
    }
}

impl<'de> Deserialize<'de> for MachineRoster {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, MachineSummary>::deserialize(deserializer)?;
        let mut roster = MachineRoster::new();
        for (name, summary) in raw {
            // the map key is authoritative for the name
            roster.insert(name, summary);
        }
        Ok(roster)
    }
}

impl FromIterator<MachineSummary> for MachineRoster {
    fn from_iter<T: IntoIterator<Item = MachineSummary>>(iter: T) -> Self {
        let mut roster = MachineRoster::new();
        for summary in iter {
            let name = summary.name.clone();
            roster.insert(name, summary);
        }
        roster
    }
}

// ─────────────────────────────────────────────────────────────────
// Detail
// ─────────────────────────────────────────────────────────────────

/// Full record for one machine, including plugin extras
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireMachine", into = "WireMachine")]
pub struct MachineDetail {
    pub name: String,
    pub category: String,
    pub online: bool,
    pub stats: StatsReport,
    pub extras: Extras,
}

impl From<WireMachine> for MachineDetail {
    fn from(wire: WireMachine) -> Self {
        let data = MachineData::split(wire.data);
        Self {
            name: wire.name,
            category: wire.category,
            online: data.online,
            stats: data.stats,
            extras: data.extras,
        }
    }
}

impl From<MachineDetail> for WireMachine {
    fn from(detail: MachineDetail) -> Self {
        let data = MachineData::join(detail.online, &detail.stats, &detail.extras);
        Self {
            name: detail.name,
            category: detail.category,
            data,
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Supporting endpoints
// ─────────────────────────────────────────────────────────────────

/// Plugin and script names known to the server (config editor support)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuxLists {
    #[serde(rename = "plugins", default)]
    pub plugin_tags: Vec<String>,
    #[serde(rename = "scripts", default)]
    pub script_tags: Vec<String>,
}

/// Server-wide counters and versions shown in the header
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSummary {
    #[serde(default)]
    pub online_machines: u64,
    #[serde(default)]
    pub total_machines: u64,
    #[serde(default)]
    pub frontend_version: String,
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub db_size: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn roster_json() -> Value {
        json!({
            "web-2": {"name": "web-2", "category": "web",
                      "data": {"online": true, "stats": {
                          "cpu": {"1m": "0.52", "5m": "0.40", "15m": "0.31"},
                          "ram": {"used": 50, "free": 150, "total": 200},
                          "disk": {"used": 170, "free": 30, "total": 200},
                          "boot_time": 1700000000.5
                      }}},
            "db-1": {"name": "db-1", "category": "db",
                     "data": {"online": false, "stats": "invalid stats"}},
            "web-1": {"name": "web-1", "category": "web", "data": "invalid stats"}
        })
    }

    #[test]
    fn test_roster_decodes_mixed_entries() {
        let roster: MachineRoster = serde_json::from_value(roster_json()).unwrap();
        assert_eq!(roster.len(), 3);

        let web2 = roster.get("web-2").unwrap();
        assert!(web2.online);
        let stats = web2.stats.valid().unwrap();
        assert_eq!(stats.cpu_one_minute(), Some(0.52));
        assert_eq!(stats.ram_percent(), Some(25.0));
        assert_eq!(stats.disk_percent(), Some(85.0));

        let db1 = roster.get("db-1").unwrap();
        assert!(!db1.online);
        assert_eq!(db1.stats, StatsReport::Invalid);

        let web1 = roster.get("web-1").unwrap();
        assert!(!web1.online);
        assert!(!web1.stats.is_valid());
    }

    #[test]
    fn test_roster_key_is_authoritative_name() {
        let roster: MachineRoster = serde_json::from_value(json!({
            "alpha": {"category": "x", "data": {"online": true}}
        }))
        .unwrap();
        assert_eq!(roster.get("alpha").unwrap().name, "alpha");
        assert_eq!(roster.get("alpha").unwrap().stats, StatsReport::Invalid);
    }

    #[test]
    fn test_categories_sorted_ascending_case_sensitive() {
        let roster: MachineRoster = ["b", "a", "B", "a"]
            .iter()
            .enumerate()
            .map(|(i, c)| MachineSummary {
                name: format!("m{i}"),
                category: c.to_string(),
                ..Default::default()
            })
            .collect();
        assert_eq!(roster.categories(), vec!["B", "a", "b"]);
    }

    #[test]
    fn test_in_category_is_name_ordered() {
        let roster: MachineRoster = serde_json::from_value(roster_json()).unwrap();
        let names: Vec<_> = roster.in_category("web").map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["web-1", "web-2"]);
    }

    #[test]
    fn test_malformed_stats_object_is_invalid() {
        let detail: MachineDetail = serde_json::from_value(json!({
            "name": "n", "category": "c",
            "data": {"online": true, "stats": {"ram": "lots"}}
        }))
        .unwrap();
        assert!(detail.online);
        assert_eq!(detail.stats, StatsReport::Invalid);
    }

    #[test]
    fn test_detail_splits_extras_from_data() {
        let detail: MachineDetail = serde_json::from_value(json!({
            "name": "node1", "category": "miners",
            "data": {
                "online": true,
                "stats": {"ram": {"used": 1, "free": 1, "total": 2}},
                "xmrig": "failed",
                "future_plugin": {"x": 1}
            }
        }))
        .unwrap();
        assert_eq!(detail.name, "node1");
        assert!(detail.stats.is_valid());
        assert_eq!(detail.extras.len(), 2);
        assert!(detail.extras.contains("xmrig"));
        assert!(detail.extras.contains("future_plugin"));
        assert!(!detail.extras.contains("online"));
        assert!(!detail.extras.contains("stats"));
    }

    #[test]
    fn test_detail_with_invalid_data_marker() {
        let detail: MachineDetail = serde_json::from_value(json!({
            "name": "node1", "category": "miners", "data": "invalid stats"
        }))
        .unwrap();
        assert!(!detail.online);
        assert_eq!(detail.stats, StatsReport::Invalid);
        assert!(detail.extras.is_empty());
    }

    #[test]
    fn test_detail_serializes_back_to_wire_shape() {
        let mut extras = Extras::new();
        extras.insert("xmrig", json!("failed"));
        let detail = MachineDetail {
            name: "node1".into(),
            category: "miners".into(),
            online: true,
            stats: StatsReport::Invalid,
            extras,
        };
        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["data"]["online"], json!(true));
        assert_eq!(value["data"]["stats"], json!("invalid stats"));
        assert_eq!(value["data"]["xmrig"], json!("failed"));
    }

    #[test]
    fn test_usage_zero_total() {
        let usage = Usage {
            used: Some(0),
            free: Some(0),
            total: Some(0),
        };
        assert_eq!(usage.percent(), None);
    }

    #[test]
    fn test_uptime_from_boot_time() {
        let stats = MachineStats {
            boot_time: Some(1_000.0),
            ..Default::default()
        };
        assert_eq!(stats.uptime_secs(4_600.0), Some(3_600.0));
        assert_eq!(stats.uptime_secs(10.0), Some(0.0));
    }

    #[test]
    fn test_aux_lists_and_server_summary() {
        let aux: AuxLists =
            serde_json::from_value(json!({"plugins": ["xmrig"], "scripts": ["xmrig", "ntfy"]}))
                .unwrap();
        assert_eq!(aux.plugin_tags, vec!["xmrig"]);
        assert_eq!(aux.script_tags.len(), 2);

        let srv: ServerSummary = serde_json::from_value(json!({
            "online_machines": 3, "total_machines": 5,
            "frontend_version": "1.4.0", "api_version": "1.4.0"
        }))
        .unwrap();
        assert_eq!(srv.online_machines, 3);
        assert_eq!(srv.db_size, None);
    }
}
