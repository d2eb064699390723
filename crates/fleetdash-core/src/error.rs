//! Application error types with rich context

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Terminal/TUI Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    // ─────────────────────────────────────────────────────────────
    // Telemetry API Errors
    // ─────────────────────────────────────────────────────────────
    /// The request never produced a response (connect, timeout, TLS...)
    #[error("Network error requesting {url}: {message}")]
    Network { url: String, message: String },

    /// The server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Http { url: String, status: u16 },

    /// The body could not be decoded into the expected shape
    #[error("Failed to parse response from {url}: {message}")]
    Parse { url: String, message: String },

    // ─────────────────────────────────────────────────────────────
    // Plugin Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Plugin '{key}' failed: {message}")]
    Plugin { key: String, message: String },

    #[error("Plugin key '{key}' registered twice")]
    DuplicatePlugin { key: String },

    // ─────────────────────────────────────────────────────────────
    // Navigation/Location Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid location '{input}': {message}")]
    InvalidLocation { input: String, message: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn network(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Network {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn http(url: impl Into<String>, status: u16) -> Self {
        Self::Http {
            url: url.into(),
            status,
        }
    }

    pub fn parse(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn plugin(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Plugin {
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn duplicate_plugin(key: impl Into<String>) -> Self {
        Self::DuplicatePlugin { key: key.into() }
    }

    pub fn invalid_location(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidLocation {
            input: input.into(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Short user-facing description for the status line.
    ///
    /// Network and parse failures collapse to a one-liner; everything else
    /// falls back to the Display text.
    pub fn notice(&self) -> String {
        match self {
            Error::Network { .. } => "API unreachable".to_string(),
            Error::Http { status, .. } => format!("API returned HTTP {status}"),
            Error::Parse { .. } => "API returned malformed data".to_string(),
            other => other.to_string(),
        }
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Network { .. }
                | Error::Http { .. }
                | Error::Parse { .. }
                | Error::Plugin { .. }
        )
    }

    /// Check if this error should trigger application exit
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::Terminal { .. }
                | Error::DuplicatePlugin { .. }
                | Error::InvalidLocation { .. }
                | Error::ConfigNotFound { .. }
        )
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}
