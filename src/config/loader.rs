//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Server queried when nothing else is configured.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8765";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Default idle delay before a search edit is applied, in milliseconds.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

/// Environment variable naming an alternate config file.
pub const CONFIG_PATH_ENV: &str = "CMDLV_CONFIG";

/// Environment variable overriding the server URL.
pub const SERVER_ENV: &str = "CMDLV_SERVER";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/cmdlv/config.toml`:
///
/// ```toml
/// server_url = "http://logs.internal:8765"
/// page_size = 25
/// request_timeout_secs = 10
/// search_debounce_ms = 250
/// absolute_timestamps = true
/// log_file_path = "/tmp/cmdlv.log"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Base URL of the log server.
    #[serde(default)]
    pub server_url: Option<String>,

    /// Rows per page; the server's default applies when unset.
    #[serde(default)]
    pub page_size: Option<u32>,

    /// HTTP request timeout in seconds.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Search debounce delay in milliseconds.
    #[serde(default)]
    pub search_debounce_ms: Option<u64>,

    /// Show absolute instead of relative timestamps on startup.
    #[serde(default)]
    pub absolute_timestamps: Option<bool>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Base URL of the log server.
    pub server_url: String,
    /// Rows per page (`None` lets the server decide).
    pub page_size: Option<u32>,
    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Search debounce delay in milliseconds.
    pub search_debounce_ms: u64,
    /// Start with absolute timestamps.
    pub absolute_timestamps: bool,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            page_size: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            absolute_timestamps: false,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Search debounce delay as a `Duration`.
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/cmdlv/cmdlv.log` on Linux, or the platform's
/// state directory elsewhere. Falls back to the current directory when no
/// state directory exists (macOS, Windows).
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("cmdlv").join("cmdlv.log")
    } else {
        PathBuf::from("cmdlv.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/cmdlv/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cmdlv").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `CMDLV_CONFIG` environment variable
/// 3. Default path `~/.config/cmdlv/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error if a config file exists but cannot be read or parsed, or
/// if `CMDLV_CONFIG` is set to a non-UTF-8 value.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    match std::env::var(CONFIG_PATH_ENV) {
        Ok(env_path) => return load_config_file(PathBuf::from(env_path)),
        Err(std::env::VarError::NotUnicode(raw)) => {
            return Err(ConfigError::InvalidPath(raw.to_string_lossy().into_owned()));
        }
        Err(std::env::VarError::NotPresent) => {}
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `CMDLV_SERVER`: Override server URL (ignored when blank)
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(server) = std::env::var(SERVER_ENV) {
        if !server.trim().is_empty() {
            config.server_url = server;
        }
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use
/// default. A `page_size` of zero means "server default".
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        server_url: config.server_url.unwrap_or(defaults.server_url),
        page_size: config.page_size.filter(|n| *n > 0),
        request_timeout_secs: config
            .request_timeout_secs
            .unwrap_or(defaults.request_timeout_secs),
        search_debounce_ms: config
            .search_debounce_ms
            .unwrap_or(defaults.search_debounce_ms),
        absolute_timestamps: config
            .absolute_timestamps
            .unwrap_or(defaults.absolute_timestamps),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    server_override: Option<String>,
    page_size_override: Option<u32>,
    absolute_override: Option<bool>,
) -> ResolvedConfig {
    if let Some(server) = server_override {
        config.server_url = server;
    }

    if let Some(page_size) = page_size_override {
        config.page_size = Some(page_size).filter(|n| *n > 0);
    }

    if let Some(absolute) = absolute_override {
        config.absolute_timestamps = absolute;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
