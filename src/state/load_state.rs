//! Result cache for one remote resource, with stale-response suppression.
//!
//! A `Loadable` remembers which key its data belongs to and which request it
//! is waiting on. Completions for any other request are dropped, so a slow
//! response for superseded parameters never replaces newer results.

use crate::source::{FetchError, RequestId};
use tracing::warn;

/// Cached value of a fetch keyed by the parameters that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Loadable<K, T> {
    key: Option<K>,
    stale: bool,
    pending: Option<RequestId>,
    data: Option<T>,
    error: Option<String>,
}

impl<K, T> Default for Loadable<K, T> {
    fn default() -> Self {
        Self {
            key: None,
            stale: false,
            pending: None,
            data: None,
            error: None,
        }
    }
}

impl<K: PartialEq, T> Loadable<K, T> {
    /// Empty cache that has never requested anything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the cache must be (re)requested to show `key`.
    pub fn needs(&self, key: &K) -> bool {
        self.stale || self.key.as_ref() != Some(key)
    }

    /// Record that `request` was issued for `key`.
    ///
    /// Data for a different key is dropped; data for the same key (a refresh)
    /// stays visible until the new result arrives. Any error is cleared.
    pub fn begin(&mut self, key: K, request: RequestId) {
        if self.key.as_ref() != Some(&key) {
            self.data = None;
        }
        self.key = Some(key);
        self.stale = false;
        self.pending = Some(request);
        self.error = None;
    }

    /// Apply a completion. Returns `false` if it was stale and ignored.
    ///
    /// On error the cached data is cleared and the message is kept for
    /// display.
    pub fn complete(&mut self, request: RequestId, result: Result<T, FetchError>) -> bool {
        if self.pending != Some(request) {
            warn!(%request, expected = ?self.pending, "Discarding stale response");
            return false;
        }

        self.pending = None;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(e) => {
                self.data = None;
                self.error = Some(e.to_string());
            }
        }
        true
    }

    /// Mark the cached value stale so the next tick requests it again.
    ///
    /// The current data stays visible until the new result arrives.
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    /// Key of the most recent request, if any.
    pub fn requested_for(&self) -> Option<&K> {
        self.key.as_ref()
    }

    /// Request currently awaited.
    pub fn pending(&self) -> Option<RequestId> {
        self.pending
    }

    /// Whether a request is in flight.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Last successful result, unless superseded by an error or a new key.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Message of the last failure.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
