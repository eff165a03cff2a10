//! Non-blocking request dispatch for the UI event loop.
//!
//! Requests run as tasks on a tokio runtime. Their outcomes come back over a
//! channel that the event loop drains on every tick, the same way the loop
//! polls any other input source. Nothing here decides whether an outcome is
//! still wanted; every outcome carries the `RequestId` it was issued under and
//! `Loadable` discards superseded ones.

use super::client::{FetchError, LogClient};
use crate::model::{FilterParams, LogId, LogListResponse, SessionLog};
use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};
use tokio::runtime::Handle;
use tracing::debug;

/// Identity of one issued request. Strictly increasing per `Fetcher`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    /// Wrap a raw id. Used by tests and by `Fetcher`.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Completion of one request, tagged with what it was for.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// A list request finished.
    List {
        /// The request this answers.
        request: RequestId,
        /// Filters the request was issued with.
        filters: FilterParams,
        /// Page or error.
        result: Result<LogListResponse, FetchError>,
    },
    /// A detail request finished.
    Detail {
        /// The request this answers.
        request: RequestId,
        /// Log that was requested.
        id: LogId,
        /// Record or error.
        result: Result<SessionLog, FetchError>,
    },
}

impl FetchOutcome {
    /// The request this outcome answers.
    pub fn request(&self) -> RequestId {
        match self {
            FetchOutcome::List { request, .. } | FetchOutcome::Detail { request, .. } => *request,
        }
    }
}

/// Spawns client requests on a runtime and collects their outcomes.
pub struct Fetcher {
    client: LogClient,
    runtime: Handle,
    next_id: u64,
    tx: Sender<FetchOutcome>,
    rx: Receiver<FetchOutcome>,
}

impl Fetcher {
    /// Create a fetcher that spawns onto `runtime`.
    ///
    /// The runtime must outlive the fetcher for in-flight requests to finish.
    pub fn new(client: LogClient, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            client,
            runtime,
            next_id: 0,
            tx,
            rx,
        }
    }

    fn issue_id(&mut self) -> RequestId {
        self.next_id += 1;
        RequestId(self.next_id)
    }

    /// Start a list request. Returns immediately.
    pub fn fetch_logs(&mut self, filters: FilterParams) -> RequestId {
        let request = self.issue_id();
        let client = self.client.clone();
        let tx = self.tx.clone();
        debug!(%request, query = %filters.to_query_string(), "Issuing list request");

        self.runtime.spawn(async move {
            let result = client.fetch_logs(&filters).await;
            // A closed channel means the UI has exited
            let _ = tx.send(FetchOutcome::List {
                request,
                filters,
                result,
            });
        });
        request
    }

    /// Start a detail request. Returns immediately.
    pub fn fetch_log(&mut self, id: LogId) -> RequestId {
        let request = self.issue_id();
        let client = self.client.clone();
        let tx = self.tx.clone();
        debug!(%request, %id, "Issuing detail request");

        self.runtime.spawn(async move {
            let result = client.fetch_log_by_id(&id).await;
            let _ = tx.send(FetchOutcome::Detail {
                request,
                id,
                result,
            });
        });
        request
    }

    /// Drain every outcome that has arrived. Never blocks.
    pub fn poll(&self) -> Vec<FetchOutcome> {
        self.rx.try_iter().collect()
    }
}
