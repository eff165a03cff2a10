//! Log data sources.
//!
//! The viewer reads everything from a log server over HTTP:
//! - `LogClient` issues the list and detail requests
//! - `Fetcher` runs them off the UI thread and hands outcomes back
//!   through a non-blocking `poll()`

pub mod client;
pub mod fetcher;

pub use client::{
    ClientError, FetchError, LogClient, DETAIL_FALLBACK_MESSAGE, LIST_FALLBACK_MESSAGE,
};
pub use fetcher::{FetchOutcome, Fetcher, RequestId};
