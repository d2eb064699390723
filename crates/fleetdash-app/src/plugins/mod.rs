//! Plugin registry - renders machine extras into modal panels
//!
//! Plugins are registered once at startup, in display order, and the registry
//! is then shared read-only (`Arc<PluginRegistry>`). A plugin sees only the
//! extras map; it cannot touch navigation state.
//!
//! Rendering is fail-soft: a plugin that returns an error or panics is logged
//! and skipped, and the remaining plugins still run.

pub mod basic_stats;
pub mod xmrig;

use std::cell::Cell;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};

use fleetdash_core::prelude::*;
use fleetdash_core::Extras;

use crate::panel::{PanelContent, BASIC_STATS_KEY};

pub use xmrig::XmrigPlugin;

/// A renderer for one slice of a machine's extras
pub trait TelemetryPlugin: Send + Sync + fmt::Debug {
    /// Panel key; must be unique, non-empty, and free of commas
    fn key(&self) -> &str;

    /// `Ok(None)` means the plugin does not apply to this machine.
    fn render(&self, extras: &Extras) -> Result<Option<PanelContent>>;
}

thread_local! {
    static RENDERING: Cell<bool> = const { Cell::new(false) };
}

/// True while the current thread is inside a plugin's `render`.
///
/// Panic hooks use this to tell an isolated plugin panic from a real crash.
pub fn plugin_render_in_progress() -> bool {
    RENDERING.with(Cell::get)
}

struct RenderGuard;

impl RenderGuard {
    fn enter() -> Self {
        RENDERING.with(|r| r.set(true));
        RenderGuard
    }
}

impl Drop for RenderGuard {
    fn drop(&mut self) {
        RENDERING.with(|r| r.set(false));
    }
}

/// Ordered, append-only set of plugins
#[derive(Debug, Default)]
pub struct PluginRegistry {
    plugins: Vec<Box<dyn TelemetryPlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every plugin this build ships.
    pub fn with_builtin() -> Result<Self> {
        let mut registry = Self::new();
        registry.register(Box::new(XmrigPlugin))?;
        Ok(registry)
    }

    /// Append a plugin.
    ///
    /// Duplicate keys (including the built-in stats key) are a configuration
    /// error.
    pub fn register(&mut self, plugin: Box<dyn TelemetryPlugin>) -> Result<()> {
        let key = plugin.key();
        if key.is_empty() || key.contains(',') {
            return Err(Error::plugin(key, "plugin keys must be non-empty and comma-free"));
        }
        if key == BASIC_STATS_KEY || self.plugins.iter().any(|p| p.key() == key) {
            return Err(Error::duplicate_plugin(key));
        }
        debug!("Registered plugin '{}'", key);
        self.plugins.push(plugin);
        Ok(())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.plugins.iter().map(|p| p.key())
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Render every applicable plugin, in registration order.
    pub fn run(&self, extras: &Extras) -> Vec<(String, PanelContent)> {
        let mut panels = Vec::new();
        for plugin in &self.plugins {
            let key = plugin.key();
            let outcome = {
                let _guard = RenderGuard::enter();
                catch_unwind(AssertUnwindSafe(|| plugin.render(extras)))
            };
            match outcome {
                Ok(Ok(Some(content))) => panels.push((key.to_string(), content)),
                Ok(Ok(None)) => trace!("Plugin '{}' not applicable", key),
                Ok(Err(e)) => warn!("Plugin '{}' failed: {}", key, e),
                Err(panic) => warn!("Plugin '{}' panicked: {}", key, panic_message(&*panic)),
            }
        }
        panels
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
