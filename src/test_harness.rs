//! Shared fixtures and a TUI test harness.
//!
//! Provides canned server data plus a high-level wrapper around
//! `TuiApp<TestBackend>` for simulating user interactions without a
//! network: list and detail loads are fed in as fetch outcomes.

use crate::config::keybindings::KeyBindings;
use crate::model::{
    ContextSources, FinalStatus, Iteration, LogId, LogListResponse, LogSummary, Metadata,
    ModelInput, ModelOutput, SessionLog, TmuxInfo,
};
use crate::source::{FetchError, FetchOutcome, RequestId};
use crate::state::AppState;
use crate::view::{ColorConfig, Styles, TuiApp};
use chrono::{DateTime, TimeZone, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

// ===== Fixtures =====

/// Fixed session time used by every fixture.
pub fn fixture_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 45).unwrap()
}

/// A log id; panics on an invalid fixture.
pub fn log_id(raw: &str) -> LogId {
    LogId::new(raw).unwrap()
}

/// Summary row `index`: id `log-{index}`, query `query {index}`.
pub fn summary(index: usize) -> LogSummary {
    LogSummary {
        id: log_id(&format!("log-{index}")),
        user_query: format!("query {index}"),
        final_status: FinalStatus::Accepted,
        model: "sonnet".to_string(),
        timestamp: fixture_time(),
        iteration_count: 1,
        command_preview: format!("echo {index}"),
        tmux_session: None,
    }
}

/// A page of `rows` summaries starting at `offset`, with `limit == rows`.
pub fn page(rows: usize, total: u64, offset: u32) -> LogListResponse {
    let start = offset as usize;
    LogListResponse {
        logs: (start..start + rows).map(summary).collect(),
        total,
        limit: rows as u32,
        offset,
    }
}

/// A two-iteration accepted session run inside tmux.
pub fn session_log(id: &str) -> SessionLog {
    let user_prompt = "Convert to a command: list large files\n\n\
        Available build tools and commands in current directory:\n\
        ---\n\
        Makefile targets: build, test\n\
        ---\n";

    let iteration = |feedback: &str, command: &str| Iteration {
        feedback: feedback.to_string(),
        model_input: ModelInput {
            system_prompt: "You translate requests into shell commands.".to_string(),
            user_prompt: user_prompt.to_string(),
        },
        model_output: ModelOutput {
            raw_response: format!("{{\"command\": \"{command}\"}}"),
            command: command.to_string(),
            explanation: "Shows disk usage per entry".to_string(),
        },
        timestamp: fixture_time(),
    };

    SessionLog {
        id: log_id(id),
        user_query: "list large files".to_string(),
        context_sources: ContextSources {
            claude_md_content: "prefer fd over find".to_string(),
            terminal_context: "$ ls\nfoo bar".to_string(),
            documentation_context: String::new(),
        },
        iterations: vec![
            iteration("", "du -sh *"),
            iteration("sort them", "du -sh * | sort -h"),
        ],
        metadata: Metadata {
            timestamp: fixture_time(),
            model: "sonnet".to_string(),
            final_status: FinalStatus::Accepted,
            final_feedback: None,
            iteration_count: 2,
            tmux_info: TmuxInfo {
                in_tmux: true,
                session: Some("work".to_string()),
                window: Some("editor".to_string()),
                pane: None,
            },
        },
    }
}

/// Convert a ratatui buffer to a string representation.
///
/// Captures the visual output character by character, preserving layout.
/// Empty trailing lines are removed.
pub fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        lines.push(line.trim_end().to_string());
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

// ===== Harness =====

/// Wraps `TuiApp<TestBackend>` with request bookkeeping.
///
/// Requests the app would issue are recorded with increasing ids; tests
/// answer them with `deliver_list` / `deliver_detail`.
pub struct TuiHarness {
    app: TuiApp<TestBackend>,
    next_request: u64,
}

impl TuiHarness {
    /// Harness with the default 100x30 terminal.
    pub fn new(state: AppState) -> Self {
        Self::with_size(state, 100, 30)
    }

    /// Harness with a custom terminal size.
    pub fn with_size(state: AppState, width: u16, height: u16) -> Self {
        let terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let app = TuiApp::new_for_test(
            terminal,
            state,
            KeyBindings::default(),
            Styles::new(ColorConfig::new(false)),
            "http://localhost:8765".to_string(),
        );
        Self {
            app,
            next_request: 0,
        }
    }

    fn issue(&mut self) -> RequestId {
        self.next_request += 1;
        RequestId::new(self.next_request)
    }

    /// Start whichever requests the state wants; returns (list, detail) ids.
    pub fn sync(&mut self) -> (Option<RequestId>, Option<RequestId>) {
        let list = self.app.app_state().list_request_needed().map(|params| {
            let request = self.issue();
            self.app.app_state_mut().begin_list(params, request);
            request
        });
        let detail = self.app.app_state().detail_request_needed().map(|id| {
            let request = self.issue();
            self.app.app_state_mut().begin_detail(id, request);
            request
        });
        (list, detail)
    }

    /// Issue pending requests and answer the list request with `result`.
    pub fn deliver_list(&mut self, result: Result<LogListResponse, FetchError>) {
        let (request, _) = self.sync();
        let request = request.expect("a list request should be pending");
        let filters = self.app.app_state().filters.params().clone();
        self.app.app_state_mut().apply_outcome(FetchOutcome::List {
            request,
            filters,
            result,
        });
    }

    /// Issue pending requests and answer the detail request with `result`.
    pub fn deliver_detail(&mut self, result: Result<SessionLog, FetchError>) {
        let (_, request) = self.sync();
        let request = request.expect("a detail request should be pending");
        let id = self
            .app
            .app_state()
            .viewed_log()
            .cloned()
            .expect("detail screen");
        self.app.app_state_mut().apply_outcome(FetchOutcome::Detail {
            request,
            id,
            result,
        });
    }

    /// Send a single key; returns true if the app quit.
    pub fn send_key(&mut self, key: KeyCode) -> bool {
        self.send_key_with_mods(key, KeyModifiers::NONE)
    }

    /// Send a key with modifiers (e.g. Ctrl+C).
    pub fn send_key_with_mods(&mut self, key: KeyCode, mods: KeyModifiers) -> bool {
        self.app.handle_key_test(KeyEvent::new(key, mods))
    }

    /// Type text one character at a time.
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.send_key(KeyCode::Char(ch));
        }
    }

    /// Read-only state for assertions.
    pub fn state(&self) -> &AppState {
        self.app.app_state()
    }

    /// Mutable state, for setting up scenarios directly.
    pub fn state_mut(&mut self) -> &mut AppState {
        self.app.app_state_mut()
    }

    /// Render one frame and return the screen as text.
    pub fn render_to_string(&mut self) -> String {
        self.app
            .render_test()
            .expect("Rendering should succeed in test harness");
        buffer_to_string(self.app.terminal().backend().buffer())
    }
}
