//! Command Log Viewer (cmdlv)
//!
//! TUI application for browsing command-generation session logs served by a
//! log server over HTTP.
//!
//! Pure Core / Impure Shell: `model` and `state` are pure data and
//! transitions; `source` performs HTTP requests off the UI thread and
//! `view` owns the terminal.

pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;

#[cfg(test)]
mod test_harness;
