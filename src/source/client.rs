//! HTTP client for the log server's list and detail endpoints.

use crate::model::{FilterParams, LogId, LogListResponse, SessionLog};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

/// Path of the listing endpoint, relative to the server base URL.
pub const LOGS_PATH: &str = "api/v1/logs";

/// Message shown when a failed list response carries no usable `error`.
pub const LIST_FALLBACK_MESSAGE: &str = "Failed to fetch logs";

/// Message shown when a failed detail response carries no usable `error`.
pub const DETAIL_FALLBACK_MESSAGE: &str = "Failed to fetch log";

/// Failure of a single list or detail request.
///
/// Recovered at the fetch boundary and surfaced as a string; never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Server answered with a non-2xx status.
    ///
    /// `message` is the body's `error` field, or a fixed fallback when the
    /// body is not `{ "error": "..." }`.
    #[error("{message}")]
    Request {
        /// HTTP status code.
        status: u16,
        /// Message to show the user.
        message: String,
    },

    /// The request could not complete (connection refused, timeout, ...).
    #[error("Unable to reach the log server")]
    Network {
        /// Underlying cause, for the log file.
        reason: String,
    },

    /// A 2xx body that does not have the expected shape.
    #[error("Received an invalid response from the log server")]
    InvalidResponse {
        /// Decode error, for the log file.
        reason: String,
    },
}

/// The client could not be constructed.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Server URL is not an absolute http(s) URL.
    #[error("Invalid server URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// reqwest failed to build the client (TLS backend initialization).
    #[error("Failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Shape of error bodies: `{ "error": "log not found" }`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Extract the server-supplied message from an error body.
fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()?
        .error
        .filter(|message| !message.trim().is_empty())
}

/// Read-only client for `GET /api/v1/logs` and `GET /api/v1/logs/{id}`.
///
/// No caching: every call goes to the server. Cloning is cheap and shares
/// the connection pool.
#[derive(Debug, Clone)]
pub struct LogClient {
    http: reqwest::Client,
    logs_url: Url,
}

impl LogClient {
    /// Create a client for the server at `base_url` (e.g. `http://localhost:8765`).
    ///
    /// A path prefix on the base URL is kept (`http://host/viewer` serves
    /// `http://host/viewer/api/v1/logs`).
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidBaseUrl` for relative or non-http(s) URLs
    /// and `ClientError::Build` if the HTTP client cannot be initialized.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let invalid = |reason: &str| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: reason.to_string(),
        };

        let mut base = Url::parse(base_url.trim()).map_err(|e| invalid(&e.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https"));
        }
        if base.cannot_be_a_base() {
            return Err(invalid("URL cannot be used as a base"));
        }
        base.set_query(None);
        base.set_fragment(None);
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let logs_url = base.join(LOGS_PATH).map_err(|e| invalid(&e.to_string()))?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("cmdlv/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, logs_url })
    }

    /// Listing URL for `filters`, carrying only present, non-empty fields.
    pub fn list_url(&self, filters: &FilterParams) -> Url {
        let mut url = self.logs_url.clone();
        let pairs = filters.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        url
    }

    /// Detail URL for one log; the id is encoded as a single path segment.
    pub fn log_url(&self, id: &LogId) -> Url {
        let mut url = self.logs_url.clone();
        // logs_url is always a base URL, checked in new()
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(id.as_str());
        }
        url
    }

    /// Fetch one page of log summaries.
    ///
    /// # Errors
    ///
    /// `FetchError::Request` for non-2xx responses (message from the body or
    /// `"Failed to fetch logs"`), `FetchError::Network` when the server is
    /// unreachable, `FetchError::InvalidResponse` for malformed bodies.
    pub async fn fetch_logs(&self, filters: &FilterParams) -> Result<LogListResponse, FetchError> {
        let url = self.list_url(filters);
        debug!(%url, "Fetching log list");
        self.get_json(url, LIST_FALLBACK_MESSAGE).await
    }

    /// Fetch one complete session log.
    ///
    /// # Errors
    ///
    /// Same policy as [`LogClient::fetch_logs`], with fallback
    /// `"Failed to fetch log"`. A missing id is the server's 404.
    pub async fn fetch_log_by_id(&self, id: &LogId) -> Result<SessionLog, FetchError> {
        let url = self.log_url(id);
        debug!(%url, "Fetching log detail");
        self.get_json(url, DETAIL_FALLBACK_MESSAGE).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        fallback_message: &str,
    ) -> Result<T, FetchError> {
        let network_error = |e: reqwest::Error| {
            warn!(error = %e, "Request to log server failed");
            FetchError::Network {
                reason: e.to_string(),
            }
        };

        let response = self.http.get(url).send().await.map_err(network_error)?;
        let status = response.status();
        let body = response.text().await.map_err(network_error)?;

        if !status.is_success() {
            let message =
                server_message(&body).unwrap_or_else(|| fallback_message.to_string());
            warn!(status = status.as_u16(), %message, "Log server returned an error");
            return Err(FetchError::Request {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "Log server response did not match the expected shape");
            FetchError::InvalidResponse {
                reason: e.to_string(),
            }
        })
    }
}
