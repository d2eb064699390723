//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{Result, ResultExt};

/// Environment variable holding the tracing filter directive
pub const LOG_ENV: &str = "FLEETDASH_LOG";

/// Directive used when `FLEETDASH_LOG` is unset or unparsable. Targets match
/// by prefix, so `fleetdash` covers every workspace crate.
pub const DEFAULT_FILTER: &str = "fleetdash=info,warn";

const LOG_FILE: &str = "fleetdash.log";

/// Initialize the logging subsystem
///
/// Logs go to a daily file under `<data_local_dir>/fleetdash/logs/`; the
/// terminal belongs to the dashboard.
///
/// # Examples
/// ```bash
/// FLEETDASH_LOG=debug fleetdash
/// FLEETDASH_LOG=fleetdash_app=trace fleetdash
/// ```
pub fn init() -> Result<()> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Creating log directory {}", log_dir.display()))?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE);

    tracing_subscriber::registry()
        .with(env_filter(std::env::var(LOG_ENV).ok().as_deref()))
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("fleetdash starting, logging to {}", log_dir.display());
    Ok(())
}

/// Filter from a user directive, falling back to [`DEFAULT_FILTER`].
fn env_filter(directive: Option<&str>) -> EnvFilter {
    directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fleetdash")
        .join("logs")
}
