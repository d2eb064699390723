//! Startup wiring: settings, location, client and engine

use std::sync::Arc;

use fleetdash_api::{HttpTelemetryClient, TelemetrySource};
use fleetdash_app::config::{self, Settings};
use fleetdash_app::{resolve_location, Engine, MemoryLocation, PluginRegistry};
use fleetdash_core::prelude::*;
use url::Url;

use crate::cli::Args;

/// Main application entry point
pub async fn run(args: Args) -> Result<()> {
    // Initialize error handling
    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;

    // Initialize logging (to file, since the TUI owns stdout)
    fleetdash_core::logging::init()?;

    let settings = resolve_settings(&args).context("Invalid settings")?;
    let location =
        initial_location(&settings, args.location.as_deref()).context("Invalid --location")?;
    info!("API: {}", settings.api.base_url);
    info!("Starting at {}", location);

    let client = HttpTelemetryClient::new(settings.api.base_url.clone(), settings.api.timeout())
        .context("Failed to create API client")?;
    let engine = build_engine(settings, location, client).context("Failed to register plugins")?;

    let result = fleetdash_tui::run(engine).await;

    match &result {
        // Printed after the terminal is restored so it can be pasted back
        // into --location
        Ok(url) => println!("{url}"),
        Err(e) => error!("Application error: {:?}", e),
    }

    info!("fleetdash exiting");
    result.map(|_| ())
}

/// Settings file plus command-line overrides, validated.
///
/// An explicit `--config` must exist; the default file is optional.
pub fn resolve_settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => config::load_settings_from(path)?,
        None => match config::default_config_path() {
            Some(path) => config::load_settings(&path),
            None => Settings::default(),
        },
    };

    if let Some(api_url) = &args.api_url {
        settings.api.base_url = api_url.clone();
    }
    if let Some(secs) = args.refresh_secs {
        settings.dashboard.refresh_interval_secs = secs;
    }
    if args.hide_url {
        settings.ui.show_url = false;
    }

    settings.validate()?;
    Ok(settings)
}

/// Where the session starts: `--location` if given, else the configured one.
pub fn initial_location(settings: &Settings, arg: Option<&str>) -> Result<Url> {
    let configured = Url::parse(&settings.dashboard.location)
        .map_err(|e| Error::invalid_location(&settings.dashboard.location, e.to_string()))?;
    match arg {
        Some(arg) => resolve_location(&configured, arg),
        None => Ok(configured),
    }
}

/// An engine over `client` with the built-in plugins, starting at `location`.
pub fn build_engine<C>(settings: Settings, location: Url, client: C) -> Result<Engine<C>>
where
    C: TelemetrySource + Sync + 'static,
{
    let registry = Arc::new(PluginRegistry::with_builtin()?);
    debug!("Registered {} plugins", registry.len());
    Ok(Engine::new(
        settings,
        Box::new(MemoryLocation::new(location)),
        client,
        registry,
    ))
}
