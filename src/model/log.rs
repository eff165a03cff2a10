//! Session log records as served by the log server.
//!
//! All types here are read-only projections of server data. The viewer
//! never mutates or persists them.

use super::identifiers::LogId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ===== FinalStatus =====

/// Terminal outcome of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinalStatus {
    /// The generated command was accepted and run.
    Accepted,
    /// The user rejected the generated command.
    Rejected,
    /// The user quit without a decision.
    Quit,
}

impl FinalStatus {
    /// All statuses, in the order the status filter cycles through them.
    pub const ALL: [FinalStatus; 3] = [
        FinalStatus::Accepted,
        FinalStatus::Rejected,
        FinalStatus::Quit,
    ];

    /// Wire name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            FinalStatus::Accepted => "accepted",
            FinalStatus::Rejected => "rejected",
            FinalStatus::Quit => "quit",
        }
    }
}

impl fmt::Display for FinalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status name that is not accepted/rejected/quit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown final status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for FinalStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FinalStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

// ===== Summary (list endpoint) =====

/// One row of the log list. One summary per session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogSummary {
    /// Log identifier.
    pub id: LogId,
    /// The natural-language query the user asked.
    pub user_query: String,
    /// Session outcome.
    pub final_status: FinalStatus,
    /// Model tag (e.g. "sonnet").
    pub model: String,
    /// Session start time.
    pub timestamp: DateTime<Utc>,
    /// Number of generate/feedback iterations.
    pub iteration_count: u32,
    /// Last generated command, truncated by the server.
    #[serde(default)]
    pub command_preview: String,
    /// Tmux session name, when the query ran inside tmux.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmux_session: Option<String>,
}

/// Body of a successful `GET /api/v1/logs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogListResponse {
    /// The requested page of summaries.
    pub logs: Vec<LogSummary>,
    /// Total matches before pagination.
    pub total: u64,
    /// Page size the server applied.
    pub limit: u32,
    /// Offset the server applied.
    pub offset: u32,
}

impl LogListResponse {
    /// One-based index range of the rows on this page, or `None` when empty.
    pub fn page_range(&self) -> Option<(u64, u64)> {
        if self.logs.is_empty() {
            return None;
        }
        let start = u64::from(self.offset) + 1;
        Some((start, start + self.logs.len() as u64 - 1))
    }
}

// ===== Full record (detail endpoint) =====

/// Tmux session/window/pane active when the query was issued.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TmuxInfo {
    /// Whether the query ran inside tmux at all.
    #[serde(default)]
    pub in_tmux: bool,
    /// Session name.
    #[serde(default)]
    pub session: Option<String>,
    /// Window name.
    #[serde(default)]
    pub window: Option<String>,
    /// Pane index.
    #[serde(default)]
    pub pane: Option<String>,
}

/// Context fed into the prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextSources {
    /// Content of the user's preference file (claude.md).
    #[serde(default)]
    pub claude_md_content: String,
    /// Captured terminal scrollback.
    #[serde(default)]
    pub terminal_context: String,
    /// Command-related sections extracted from project documentation.
    #[serde(default)]
    pub documentation_context: String,
}

/// Exact prompts sent to the model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInput {
    /// System prompt.
    #[serde(default)]
    pub system_prompt: String,
    /// User prompt, including detected build tools.
    #[serde(default)]
    pub user_prompt: String,
}

/// Exact model output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelOutput {
    /// Raw response text.
    #[serde(default)]
    pub raw_response: String,
    /// Generated shell command.
    #[serde(default)]
    pub command: String,
    /// Explanation of the command.
    #[serde(default)]
    pub explanation: String,
}

/// One generate/feedback cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Iteration {
    /// Feedback that triggered this attempt (empty for the first).
    #[serde(default)]
    pub feedback: String,
    /// Prompts sent.
    pub model_input: ModelInput,
    /// Output received.
    pub model_output: ModelOutput,
    /// When the attempt was made.
    pub timestamp: DateTime<Utc>,
}

/// Session metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Session start time.
    pub timestamp: DateTime<Utc>,
    /// Model tag.
    pub model: String,
    /// Session outcome.
    pub final_status: FinalStatus,
    /// Feedback given with the final decision, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_feedback: Option<String>,
    /// Number of iterations.
    pub iteration_count: u32,
    /// Tmux information.
    #[serde(default)]
    pub tmux_info: TmuxInfo,
}

/// Complete log for one invocation, as returned by `GET /api/v1/logs/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionLog {
    /// Log identifier.
    pub id: LogId,
    /// The natural-language query.
    pub user_query: String,
    /// Context fed into the prompt.
    #[serde(default)]
    pub context_sources: ContextSources,
    /// Attempts in order.
    #[serde(default)]
    pub iterations: Vec<Iteration>,
    /// Session metadata.
    pub metadata: Metadata,
}

impl SessionLog {
    /// The most recent iteration, which the detail tabs display.
    pub fn last_iteration(&self) -> Option<&Iteration> {
        self.iterations.last()
    }
}
