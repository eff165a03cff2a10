//! TUI rendering and the event loop (impure shell).

pub mod constants;
mod detail;
mod filter_bar;
mod help;
mod helpers;
mod layout;
mod list;
mod styles;
pub mod tabs;

pub use filter_bar::{share_query, PromptInput};
pub use help::render_help_overlay;
pub use helpers::{empty_line, key_value_line};
pub use styles::{status_label, ColorConfig, Styles};

use crate::config::keybindings::KeyBindings;
use crate::model::AppError;
use crate::source::Fetcher;
use crate::state::AppState;
use constants::TICK_INTERVAL;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    key_bindings: KeyBindings,
    styles: Styles,
    /// Server base URL, shown in the header
    server: String,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(
        app_state: AppState,
        key_bindings: KeyBindings,
        styles: Styles,
        server: String,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Ok(Self {
            terminal,
            app_state,
            key_bindings,
            styles,
            server,
        })
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits (q or Ctrl+C). Each pass issues any
    /// request the state wants, folds in finished requests, advances the
    /// search debounce, then redraws and waits up to one tick for input.
    pub fn run(&mut self, fetcher: &mut Fetcher) -> Result<(), TuiError> {
        loop {
            self.sync_requests(fetcher);
            for outcome in fetcher.poll() {
                let request = outcome.request();
                if !self.app_state.apply_outcome(outcome) {
                    debug!(%request, "Discarded superseded response");
                }
            }
            self.app_state.tick(Instant::now());

            self.draw()?;
            if self.app_state.should_quit {
                info!("Quit requested");
                return Ok(());
            }

            if event::poll(TICK_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key);
                    }
                    // Resize: the next draw picks up the new size
                    _ => {}
                }
            }
        }
    }

    /// Start the list and detail requests the state is missing.
    fn sync_requests(&mut self, fetcher: &mut Fetcher) {
        if let Some(params) = self.app_state.list_request_needed() {
            let request = fetcher.fetch_logs(params.clone());
            self.app_state.begin_list(params, request);
        }
        if let Some(id) = self.app_state.detail_request_needed() {
            let request = fetcher.fetch_log(id.clone());
            self.app_state.begin_detail(id, request);
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Special case: Ctrl+C should always quit, even while typing
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.app_state.should_quit = true;
            return true;
        }

        // An open prompt captures typing keys before binding dispatch
        if self.app_state.prompt.is_some() {
            let now = Instant::now();
            match key.code {
                KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.app_state.prompt_insert(ch, now);
                }
                KeyCode::Backspace => self.app_state.prompt_backspace(now),
                KeyCode::Left => self.app_state.prompt_cursor_left(),
                KeyCode::Right => self.app_state.prompt_cursor_right(),
                KeyCode::Enter => self.app_state.submit_prompt(),
                KeyCode::Esc => self.app_state.cancel_prompt(),
                _ => {}
            }
            return false;
        }

        if let Some(action) = self.key_bindings.get(key) {
            debug!(?action, "Key action");
            self.app_state.handle_action(action);
        }
        self.app_state.should_quit
    }

    /// Render the current frame
    ///
    /// The detail view reports how far its content can scroll for the
    /// current terminal size; that bound is fed back into the state.
    fn draw(&mut self) -> Result<(), TuiError> {
        let state = &self.app_state;
        let styles = &self.styles;
        let server = self.server.as_str();
        let now = chrono::Utc::now();
        let mut scroll_max = 0;

        self.terminal.draw(|frame| {
            scroll_max = layout::render_layout(frame, state, styles, server, now);
        })?;

        self.app_state.set_detail_scroll_max(scroll_max);
        Ok(())
    }
}

// ===== Test Helpers =====

#[cfg(test)]
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create TuiApp for testing without terminal initialization.
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        app_state: AppState,
        key_bindings: KeyBindings,
        styles: Styles,
        server: String,
    ) -> Self {
        Self {
            terminal,
            app_state,
            key_bindings,
            styles,
            server,
        }
    }

    /// Get reference to app state (test-only accessor)
    pub(crate) fn app_state(&self) -> &AppState {
        &self.app_state
    }

    /// Get mutable app state (test-only accessor)
    pub(crate) fn app_state_mut(&mut self) -> &mut AppState {
        &mut self.app_state
    }

    /// Handle a single keyboard event (test-only accessor)
    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    /// Render a frame (test-only accessor)
    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    /// Terminal backend access (test-only accessor)
    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Initialize and run the TUI application.
///
/// Handles terminal setup, runs the event loop, and restores the terminal
/// on exit, including when the loop fails.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_app(
    app_state: AppState,
    styles: Styles,
    server: String,
    fetcher: &mut Fetcher,
) -> Result<(), TuiError> {
    let mut app = TuiApp::new(app_state, KeyBindings::default(), styles, server)?;

    let result = app.run(fetcher);

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "tui_tests.rs"]
mod tests;
