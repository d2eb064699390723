//! URL state store - the single persisted source of navigation state
//!
//! The dashboard keeps three query parameters:
//!
//! | Key  | Meaning                  |
//! |------|--------------------------|
//! | `c`  | selected category        |
//! | `m`  | open machine (detail)    |
//! | `mt` | expanded panel keys, comma-separated |
//!
//! [`UrlStateStore::read`] derives a [`NavState`] from the current location,
//! [`UrlStateStore::write`] merges a [`NavPatch`] into it and replaces the
//! current history entry. Empty values are written by deleting the key.

use std::collections::BTreeSet;
use std::fmt;

use fleetdash_core::prelude::*;
use url::Url;

pub const CATEGORY_KEY: &str = "c";
pub const MACHINE_KEY: &str = "m";
pub const PANELS_KEY: &str = "mt";

const PANEL_SEPARATOR: char = ',';

// ─────────────────────────────────────────────────────────────────
// Location
// ─────────────────────────────────────────────────────────────────

/// A browser-like location with a history stack
#[cfg_attr(test, mockall::automock)]
pub trait Location: Send {
    /// The current URL
    fn href(&self) -> Url;

    /// Swap the current history entry for `url`
    fn replace_state(&mut self, url: Url);

    /// Add `url` as a new history entry
    fn push_state(&mut self, url: Url);
}

/// In-process location used by the terminal front end
#[derive(Debug, Clone)]
pub struct MemoryLocation {
    entries: Vec<Url>,
}

impl MemoryLocation {
    pub fn new(url: Url) -> Self {
        Self { entries: vec![url] }
    }

    pub fn parse(input: &str) -> Result<Self> {
        Url::parse(input)
            .map(Self::new)
            .map_err(|e| Error::invalid_location(input, e.to_string()))
    }

    /// Number of history entries
    pub fn history_len(&self) -> usize {
        self.entries.len()
    }
}

impl Location for MemoryLocation {
    fn href(&self) -> Url {
        // entries is never empty
        self.entries[self.entries.len() - 1].clone()
    }

    fn replace_state(&mut self, url: Url) {
        if let Some(last) = self.entries.last_mut() {
            *last = url;
        }
    }

    fn push_state(&mut self, url: Url) {
        self.entries.push(url);
    }
}

/// Resolve a `--location` argument.
///
/// A bare query (`?c=miners&m=node1`) is applied to `configured`; anything
/// else must be an absolute URL.
pub fn resolve_location(configured: &Url, arg: &str) -> Result<Url> {
    if let Some(query) = arg.strip_prefix('?') {
        let mut url = configured.clone();
        url.set_query(if query.is_empty() { None } else { Some(query) });
        return Ok(url);
    }
    Url::parse(arg).map_err(|e| Error::invalid_location(arg, e.to_string()))
}

// ─────────────────────────────────────────────────────────────────
// NavState / NavPatch
// ─────────────────────────────────────────────────────────────────

/// Navigation state derived from the URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavState {
    pub category: Option<String>,
    pub open_machine: Option<String>,
    /// Only meaningful while `open_machine` is set
    pub open_panels: BTreeSet<String>,
}

impl NavState {
    /// Parse the dashboard keys out of `url`; the first occurrence of each key wins.
    pub fn from_url(url: &Url) -> Self {
        let mut category = None;
        let mut open_machine = None;
        let mut open_panels = None;

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                CATEGORY_KEY if category.is_none() => category = Some(value.into_owned()),
                MACHINE_KEY if open_machine.is_none() => open_machine = Some(value.into_owned()),
                PANELS_KEY if open_panels.is_none() => open_panels = Some(parse_panels(&value)),
                _ => {}
            }
        }

        Self {
            category: category.filter(|c| !c.is_empty()),
            open_machine: open_machine.filter(|m| !m.is_empty()),
            open_panels: open_panels.unwrap_or_default(),
        }
    }

    /// The state after applying `patch`
    pub fn merge(&self, patch: &NavPatch) -> Self {
        let mut next = self.clone();
        if let Some(category) = &patch.category {
            next.category = category.clone().filter(|c| !c.is_empty());
        }
        if let Some(machine) = &patch.open_machine {
            next.open_machine = machine.clone().filter(|m| !m.is_empty());
        }
        if let Some(panels) = &patch.open_panels {
            next.open_panels = normalize_panels(panels);
        }
        next
    }

    /// Link that opens `machine` with `panels` expanded, e.g. for alert notifications.
    pub fn deep_link<I, S>(base: &Url, machine: &str, panels: I) -> Url
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        NavPatch::new()
            .open_machine(machine)
            .open_panels(panels)
            .apply_to(base)
    }
}

fn parse_panels(value: &str) -> BTreeSet<String> {
    value
        .split(PANEL_SEPARATOR)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Keys as they read back from `mt`: trimmed, split on commas, non-empty.
fn normalize_panels(panels: &BTreeSet<String>) -> BTreeSet<String> {
    panels.iter().flat_map(|p| parse_panels(p)).collect()
}

/// A partial update of [`NavState`]. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavPatch {
    pub category: Option<Option<String>>,
    pub open_machine: Option<Option<String>>,
    pub open_panels: Option<BTreeSet<String>>,
}

impl NavPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(Some(category.into()));
        self
    }

    pub fn clear_category(mut self) -> Self {
        self.category = Some(None);
        self
    }

    pub fn open_machine(mut self, name: impl Into<String>) -> Self {
        self.open_machine = Some(Some(name.into()));
        self
    }

    pub fn clear_machine(mut self) -> Self {
        self.open_machine = Some(None);
        self
    }

    pub fn open_panels<I, S>(mut self, panels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.open_panels = Some(panels.into_iter().map(Into::into).collect());
        self
    }

    pub fn clear_panels(mut self) -> Self {
        self.open_panels = Some(BTreeSet::new());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.open_machine.is_none() && self.open_panels.is_none()
    }

    /// Merge into `url`'s query, keeping unrelated parameters and their order.
    pub fn apply_to(&self, url: &Url) -> Url {
        let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        if let Some(category) = &self.category {
            set_pair(&mut pairs, CATEGORY_KEY, category.as_deref());
        }
        if let Some(machine) = &self.open_machine {
            set_pair(&mut pairs, MACHINE_KEY, machine.as_deref());
        }
        if let Some(panels) = &self.open_panels {
            let joined = normalize_panels(panels)
                .into_iter()
                .collect::<Vec<_>>()
                .join(",");
            set_pair(&mut pairs, PANELS_KEY, Some(&joined));
        }

        let mut next = url.clone();
        if pairs.is_empty() {
            next.set_query(None);
        } else {
            next.query_pairs_mut().clear().extend_pairs(&pairs);
        }
        next
    }
}

/// Set `key` to `value` in place, or delete every occurrence when empty.
fn set_pair(pairs: &mut Vec<(String, String)>, key: &str, value: Option<&str>) {
    let first = pairs.iter().position(|(k, _)| k == key);
    pairs.retain(|(k, _)| k != key);
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        let at = first.unwrap_or(pairs.len()).min(pairs.len());
        pairs.insert(at, (key.to_string(), value.to_string()));
    }
}

// ─────────────────────────────────────────────────────────────────
// Store
// ─────────────────────────────────────────────────────────────────

/// Typed read/write access to the navigation state held in a [`Location`]
pub struct UrlStateStore {
    location: Box<dyn Location>,
}

impl fmt::Debug for UrlStateStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlStateStore")
            .field("href", &self.location.href().as_str())
            .finish()
    }
}

impl UrlStateStore {
    pub fn new(location: Box<dyn Location>) -> Self {
        Self { location }
    }

    pub fn read(&self) -> NavState {
        NavState::from_url(&self.location.href())
    }

    /// Merge `patch` into the current URL, replacing the history entry.
    pub fn write(&mut self, patch: NavPatch) {
        if patch.is_empty() {
            return;
        }
        let next = patch.apply_to(&self.location.href());
        trace!("url -> {}", next);
        self.location.replace_state(next);
    }

    pub fn href(&self) -> Url {
        self.location.href()
    }
}
