//! Error types for the cmdlv application.
//!
//! This module defines the top of the error taxonomy using `thiserror`. Each
//! concern owns its own error enum next to the code that raises it; `AppError`
//! composes them so startup code can use `?` throughout.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error
//!   - [`ConfigError`] - Config file read/parse failures
//!   - [`LoggingError`] - Tracing subscriber setup failures
//!   - [`ClientError`] - Invalid server URL or HTTP client construction failure
//!   - `std::io::Error` - Terminal/TUI failures
//!
//! # Error Recovery Strategy
//!
//! Startup errors are fatal: without a config, a log file, a client or a
//! terminal the viewer cannot run. Request failures are not part of this
//! hierarchy. A [`FetchError`] is recovered at the fetch boundary and shown as
//! an error message in the list or detail pane; the application keeps running
//! and the user can refresh.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::source::ClientError;
use thiserror::Error;

pub use crate::source::FetchError;

/// Top-level application error encompassing all fatal failure modes.
///
/// All domain-specific error types convert to `AppError` via `From`
/// implementations, enabling clean error propagation with the `?` operator.
///
/// # Examples
///
/// ```no_run
/// use cmdlv::model::error::AppError;
/// use cmdlv::source::LogClient;
/// use std::time::Duration;
///
/// fn connect() -> Result<LogClient, AppError> {
///     // ClientError converts to AppError via From
///     Ok(LogClient::new("http://localhost:8765", Duration::from_secs(15))?)
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration file exists but could not be read or parsed.
    ///
    /// **Recovery**: Display the path and parse error, exit non-zero.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Log file could not be set up.
    ///
    /// **Recovery**: Display error and exit; the log directory is usually not
    /// writable.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// The log server URL is unusable or the HTTP client could not be built.
    ///
    /// **Recovery**: Display error, suggest `--server`, exit non-zero.
    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    /// Terminal or TUI rendering error.
    ///
    /// This indicates failures in the crossterm/ratatui layer, such as broken
    /// pipes or I/O errors during rendering. Without a working terminal the
    /// TUI cannot function.
    ///
    /// **Recovery**: Attempt graceful terminal cleanup, then exit.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}
