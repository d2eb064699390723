//! Main TUI runner - terminal lifecycle and event loop

use fleetdash_api::TelemetrySource;
use fleetdash_app::Engine;
use fleetdash_core::prelude::*;
use url::Url;

use crate::{event, render, terminal};

/// Run the dashboard until the user quits. Returns the final location so
/// the caller can print it; starting again from it restores the view.
pub async fn run<C>(mut engine: Engine<C>) -> Result<Url>
where
    C: TelemetrySource + Sync + 'static,
{
    // Install panic hook for terminal restoration
    terminal::install_panic_hook();

    let mut term = ratatui::init();

    engine.install_signal_handler();
    engine.start();

    let result = run_loop(&mut term, &mut engine);

    engine.shutdown().await;
    ratatui::restore();

    result.map(|()| engine.current_url())
}

/// Main event loop
fn run_loop<C>(terminal: &mut ratatui::DefaultTerminal, engine: &mut Engine<C>) -> Result<()>
where
    C: TelemetrySource + Sync + 'static,
{
    while !engine.should_quit() {
        // Fetch results, refresh ticks and signals
        engine.drain_pending_messages();

        terminal.draw(|frame| render::view(frame, &engine.state))?;

        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }
    }
    Ok(())
}
