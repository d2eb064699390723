//! Terminal setup and restoration

use fleetdash_app::plugin_render_in_progress;

/// Install a panic hook that restores the terminal.
///
/// Panics raised inside a plugin's render are caught by the registry and
/// the UI keeps running, so those are only logged.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        if plugin_render_in_progress() {
            tracing::error!("Plugin panicked: {}", panic_info);
            return;
        }
        ratatui::restore();
        original_hook(panic_info);
    }));
}
