//! Application state and transitions.
//!
//! AppState is the root state type containing all UI state.
//! All state transitions are pure functions following Elm architecture:
//! the event loop feeds in key actions, clock instants and fetch outcomes,
//! and asks which requests are needed. It never performs I/O itself.

use crate::model::{
    date_part, FilterKey, FilterParams, KeyAction, LogId, LogListResponse, LogSummary, SessionLog,
    TimeDisplay,
};
use crate::source::FetchOutcome;
use crate::source::RequestId;
use crate::state::{
    handle_backspace, handle_char_input, handle_cursor_left, handle_cursor_right,
    handle_tab_action, DetailTab, FilterState, InputPrompt, Loadable, PromptTarget,
    SearchDebounce,
};
use std::time::{Duration, Instant};

// ===== Screen =====

/// Which page is shown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    /// The log table (initial).
    #[default]
    Listing,
    /// One log's detail view.
    ViewingDetail(LogId),
}

// ===== AppState =====

/// Application state. Pure data, no side effects.
///
/// # State Machine
///
/// - **Screen**: `Listing` ⇄ `ViewingDetail(id)` via `open_selected` / `back`
/// - **Prompt**: closed → open (search or date) → closed via submit/cancel
/// - **Loads**: the list and detail caches are keyed by the filters and log
///   id that produced them; `list_request_needed` / `detail_request_needed`
///   report when the desired key differs from the cached one
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current list query parameters.
    pub filters: FilterState,

    /// Page being displayed.
    pub screen: Screen,

    /// Cached list page, keyed by the filters it was fetched with.
    pub list: Loadable<FilterParams, LogListResponse>,

    /// Cached detail record, keyed by log id.
    pub detail: Loadable<LogId, SessionLog>,

    /// Selected row index in the current page.
    pub selected: usize,

    /// Active detail tab.
    pub detail_tab: DetailTab,

    /// Vertical scroll offset of the detail content.
    pub detail_scroll: u16,

    /// Largest useful scroll offset, reported by the view after each frame.
    pub detail_scroll_max: u16,

    /// Open text prompt, if any.
    pub prompt: Option<InputPrompt>,

    /// Pending search edit awaiting its debounce deadline.
    pub search_debounce: SearchDebounce,

    /// Whether the help overlay is visible.
    pub help_visible: bool,

    /// Relative or absolute timestamps.
    pub time_display: TimeDisplay,

    /// Set by the Quit action; the event loop exits when true.
    pub should_quit: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(FilterParams::default())
    }
}

impl AppState {
    /// Create state on the list screen with the given filters.
    pub fn new(filters: FilterParams) -> Self {
        Self {
            filters: FilterState::new(filters),
            screen: Screen::Listing,
            list: Loadable::new(),
            detail: Loadable::new(),
            selected: 0,
            detail_tab: DetailTab::default(),
            detail_scroll: 0,
            detail_scroll_max: 0,
            prompt: None,
            search_debounce: SearchDebounce::default(),
            help_visible: false,
            time_display: TimeDisplay::default(),
            should_quit: false,
        }
    }

    /// Use `delay` as the search debounce.
    pub fn with_search_debounce(mut self, delay: Duration) -> Self {
        self.search_debounce = SearchDebounce::new(delay);
        self
    }

    /// Use the given timestamp display mode.
    pub fn with_time_display(mut self, time_display: TimeDisplay) -> Self {
        self.time_display = time_display;
        self
    }

    /// Start on the detail view of `id`.
    pub fn viewing(mut self, id: LogId) -> Self {
        self.open_log(id);
        self
    }

    // ===== Queries =====

    /// Log shown by the detail view, if that is the current screen.
    pub fn viewed_log(&self) -> Option<&LogId> {
        match &self.screen {
            Screen::ViewingDetail(id) => Some(id),
            Screen::Listing => None,
        }
    }

    /// Rows of the cached list page (empty while loading or on error).
    pub fn rows(&self) -> &[LogSummary] {
        self.list.data().map_or(&[], |page| page.logs.as_slice())
    }

    /// Summary under the selection cursor.
    pub fn selected_summary(&self) -> Option<&LogSummary> {
        self.rows().get(self.selected)
    }

    /// Total matching logs reported by the server.
    pub fn total(&self) -> u64 {
        self.list.data().map_or(0, |page| page.total)
    }

    /// Rows per page: the requested limit, else what the server applied.
    pub fn page_size(&self) -> u32 {
        self.filters
            .params()
            .limit
            .or_else(|| self.list.data().map(|page| page.limit))
            .unwrap_or(0)
    }

    // ===== Screen transitions =====

    /// Open the selected row in the detail view. No-op with no rows.
    pub fn open_selected(&mut self) {
        if let Some(id) = self.selected_summary().map(|s| s.id.clone()) {
            self.open_log(id);
        }
    }

    /// Switch to the detail view of `id`.
    ///
    /// The log is always fetched again; a cached copy of the same log stays
    /// visible until the new one arrives.
    pub fn open_log(&mut self, id: LogId) {
        self.detail.invalidate();
        self.screen = Screen::ViewingDetail(id);
        self.detail_tab = DetailTab::default();
        self.detail_scroll = 0;
        self.help_visible = false;
    }

    /// Return to the list. No-op on the list.
    pub fn back(&mut self) {
        self.screen = Screen::Listing;
    }

    // ===== Selection and scrolling =====

    fn last_row(&self) -> usize {
        self.rows().len().saturating_sub(1)
    }

    fn select_next(&mut self) {
        self.selected = (self.selected + 1).min(self.last_row());
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn scroll_detail_by(&mut self, delta: i32) {
        let next = (i32::from(self.detail_scroll) + delta).clamp(0, i32::from(self.detail_scroll_max));
        self.detail_scroll = u16::try_from(next).unwrap_or(0);
    }

    /// Record the largest scroll offset for the current content and viewport.
    pub fn set_detail_scroll_max(&mut self, max: u16) {
        self.detail_scroll_max = max;
        self.detail_scroll = self.detail_scroll.min(max);
    }

    // ===== Key actions =====

    /// Apply a key action to the current screen.
    ///
    /// Actions that do not apply to the current screen are ignored. While
    /// the help overlay is shown only Help, Back and Quit have an effect.
    pub fn handle_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Quit => {
                self.should_quit = true;
                return;
            }
            KeyAction::Help => {
                self.help_visible = !self.help_visible;
                return;
            }
            _ => {}
        }

        if self.help_visible {
            if action == KeyAction::Back {
                self.help_visible = false;
            }
            return;
        }

        match self.screen {
            Screen::Listing => self.handle_list_action(action),
            Screen::ViewingDetail(_) => self.handle_detail_action(action),
        }
    }

    fn handle_list_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::MoveUp => self.select_prev(),
            KeyAction::MoveDown => self.select_next(),
            KeyAction::MoveToTop => self.selected = 0,
            KeyAction::MoveToBottom => self.selected = self.last_row(),
            KeyAction::OpenSelected => self.open_selected(),
            KeyAction::NextPage => {
                let (total, page_size) = (self.total(), self.page_size());
                self.filters.next_page(total, page_size);
            }
            KeyAction::PrevPage => {
                let page_size = self.page_size();
                self.filters.prev_page(page_size);
            }
            KeyAction::StartSearch => self.open_prompt(PromptTarget::Search),
            KeyAction::EditFromDate => self.open_prompt(PromptTarget::From),
            KeyAction::EditToDate => self.open_prompt(PromptTarget::To),
            KeyAction::CycleStatus => self.filters.cycle_status(),
            KeyAction::CycleModel => self.filters.cycle_model(),
            KeyAction::ClearFilters => {
                self.search_debounce.cancel();
                self.filters.clear_filters();
            }
            KeyAction::SortBy(field) => self.filters.set_sort(field.as_str()),
            KeyAction::ToggleTimeDisplay => self.time_display = self.time_display.toggled(),
            KeyAction::Refresh => self.list.invalidate(),
            _ => {}
        }
    }

    fn handle_detail_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Back => self.back(),
            KeyAction::MoveUp => self.scroll_detail_by(-1),
            KeyAction::MoveDown => self.scroll_detail_by(1),
            KeyAction::MoveToTop => self.detail_scroll = 0,
            KeyAction::MoveToBottom => self.detail_scroll = self.detail_scroll_max,
            KeyAction::NextPage => self.scroll_detail_by(10),
            KeyAction::PrevPage => self.scroll_detail_by(-10),
            KeyAction::NextTab | KeyAction::PrevTab => {
                self.detail_tab = handle_tab_action(self.detail_tab, action);
                self.detail_scroll = 0;
            }
            KeyAction::ToggleTimeDisplay => self.time_display = self.time_display.toggled(),
            KeyAction::Refresh => self.detail.invalidate(),
            _ => {}
        }
    }

    // ===== Prompt =====

    /// Open a prompt pre-filled with the field's current value.
    pub fn open_prompt(&mut self, target: PromptTarget) {
        let current = self.filters.params().get(target.filter_key()).unwrap_or_default();
        let initial = match target {
            PromptTarget::Search => current.as_str(),
            PromptTarget::From | PromptTarget::To => date_part(&current),
        };
        self.prompt = Some(InputPrompt::new(target, initial));
    }

    fn edit_prompt(&mut self, edit: impl FnOnce(InputPrompt) -> InputPrompt, now: Instant) {
        let Some(prompt) = self.prompt.take() else {
            return;
        };
        let prompt = edit(prompt);
        if prompt.target == PromptTarget::Search {
            self.search_debounce.input(&prompt.buffer, now);
        }
        self.prompt = Some(prompt);
    }

    /// Type a character into the open prompt.
    pub fn prompt_insert(&mut self, ch: char, now: Instant) {
        self.edit_prompt(|p| handle_char_input(p, ch), now);
    }

    /// Delete before the cursor in the open prompt.
    pub fn prompt_backspace(&mut self, now: Instant) {
        self.edit_prompt(handle_backspace, now);
    }

    /// Move the prompt cursor left.
    pub fn prompt_cursor_left(&mut self) {
        self.prompt = self.prompt.take().map(handle_cursor_left);
    }

    /// Move the prompt cursor right.
    pub fn prompt_cursor_right(&mut self) {
        self.prompt = self.prompt.take().map(handle_cursor_right);
    }

    /// Apply the prompt's text to its field immediately and close it.
    ///
    /// A date prompt holding something that is not a date stays open and is
    /// marked invalid.
    pub fn submit_prompt(&mut self) {
        let Some(mut prompt) = self.prompt.take() else {
            return;
        };
        if !prompt.is_acceptable() {
            prompt.invalid = true;
            self.prompt = Some(prompt);
            return;
        }
        if prompt.target == PromptTarget::Search {
            self.search_debounce.cancel();
        }
        self.filters
            .set_filter(prompt.target.filter_key(), Some(&prompt.buffer));
    }

    /// Close the prompt without applying edits that have not fired yet.
    pub fn cancel_prompt(&mut self) {
        if self.prompt.take().is_some() {
            self.search_debounce.cancel();
        }
    }

    /// Advance time: apply a search edit whose debounce delay has elapsed.
    pub fn tick(&mut self, now: Instant) {
        if let Some(text) = self.search_debounce.poll(now) {
            self.filters.set_filter(FilterKey::Search, Some(&text));
        }
    }

    // ===== Loading =====

    /// Filters to fetch, when the cached page is for different filters.
    pub fn list_request_needed(&self) -> Option<FilterParams> {
        let params = self.filters.params();
        self.list.needs(params).then(|| params.clone())
    }

    /// Log to fetch, when the detail view shows a log not cached.
    pub fn detail_request_needed(&self) -> Option<LogId> {
        self.viewed_log()
            .filter(|id| self.detail.needs(id))
            .cloned()
    }

    /// Record that a list request was issued.
    ///
    /// New filters move the selection back to the first row.
    pub fn begin_list(&mut self, params: FilterParams, request: RequestId) {
        if self.list.requested_for().is_some_and(|prev| *prev != params) {
            self.selected = 0;
        }
        self.list.begin(params, request);
    }

    /// Record that a detail request was issued.
    pub fn begin_detail(&mut self, id: LogId, request: RequestId) {
        self.detail.begin(id, request);
    }

    /// Route a completed fetch into its cache.
    ///
    /// Returns `false` when the outcome was superseded and discarded.
    pub fn apply_outcome(&mut self, outcome: FetchOutcome) -> bool {
        match outcome {
            FetchOutcome::List {
                request, result, ..
            } => {
                let accepted = self.list.complete(request, result);
                if accepted {
                    self.selected = self.selected.min(self.last_row());
                }
                accepted
            }
            FetchOutcome::Detail {
                request, result, ..
            } => self.detail.complete(request, result),
        }
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
