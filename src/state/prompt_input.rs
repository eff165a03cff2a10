//! Text prompt handling (pure state transitions).
//!
//! The filter bar edits free-text fields (search, date bounds) through a
//! single-line prompt. Handlers take the prompt by value and return the
//! updated prompt, so they are testable without a terminal.
//!
//! Search edits are applied while typing, but only after input has been idle
//! for the debounce delay; `SearchDebounce` tracks that deadline against
//! caller-supplied instants.

use crate::model::{is_valid_date_bound, FilterKey};
use std::time::{Duration, Instant};

/// Default idle time before a search edit is applied.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

// ===== PromptTarget =====

/// Field a prompt edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTarget {
    /// Free-text search (debounced).
    Search,
    /// Lower date bound.
    From,
    /// Upper date bound.
    To,
}

impl PromptTarget {
    /// Filter field the prompt writes to.
    pub fn filter_key(self) -> FilterKey {
        match self {
            PromptTarget::Search => FilterKey::Search,
            PromptTarget::From => FilterKey::From,
            PromptTarget::To => FilterKey::To,
        }
    }

    /// Prompt label.
    pub fn label(self) -> &'static str {
        match self {
            PromptTarget::Search => "Search",
            PromptTarget::From => "From (YYYY-MM-DD)",
            PromptTarget::To => "To (YYYY-MM-DD)",
        }
    }
}

// ===== InputPrompt =====

/// An open single-line prompt. `cursor` counts characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPrompt {
    /// Field being edited.
    pub target: PromptTarget,
    /// Current text.
    pub buffer: String,
    /// Cursor position in characters, `0..=buffer.chars().count()`.
    pub cursor: usize,
    /// Set when a submit was refused; cleared by the next edit.
    pub invalid: bool,
}

impl InputPrompt {
    /// Open a prompt pre-filled with `initial`, cursor at the end.
    pub fn new(target: PromptTarget, initial: &str) -> Self {
        Self {
            target,
            buffer: initial.to_string(),
            cursor: initial.chars().count(),
            invalid: false,
        }
    }

    /// Whether the text can be applied to the target field.
    ///
    /// Date prompts accept a date, a timestamp, or nothing (clears the bound).
    pub fn is_acceptable(&self) -> bool {
        match self.target {
            PromptTarget::Search => true,
            PromptTarget::From | PromptTarget::To => {
                self.buffer.trim().is_empty() || is_valid_date_bound(&self.buffer)
            }
        }
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_index)
            .map_or(self.buffer.len(), |(i, _)| i)
    }
}

/// Insert `ch` at the cursor and advance it.
pub fn handle_char_input(mut prompt: InputPrompt, ch: char) -> InputPrompt {
    let at = prompt.byte_index(prompt.cursor);
    prompt.buffer.insert(at, ch);
    prompt.cursor += 1;
    prompt.invalid = false;
    prompt
}

/// Delete the character before the cursor. No-op at position 0.
pub fn handle_backspace(mut prompt: InputPrompt) -> InputPrompt {
    if prompt.cursor == 0 {
        return prompt;
    }
    let at = prompt.byte_index(prompt.cursor - 1);
    prompt.buffer.remove(at);
    prompt.cursor -= 1;
    prompt.invalid = false;
    prompt
}

/// Move the cursor left, saturating at 0.
pub fn handle_cursor_left(mut prompt: InputPrompt) -> InputPrompt {
    prompt.cursor = prompt.cursor.saturating_sub(1);
    prompt
}

/// Move the cursor right, saturating at the end of the text.
pub fn handle_cursor_right(mut prompt: InputPrompt) -> InputPrompt {
    let max = prompt.buffer.chars().count();
    prompt.cursor = (prompt.cursor + 1).min(max);
    prompt
}

// ===== SearchDebounce =====

/// Coalesces bursts of search edits into one filter change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchDebounce {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl Default for SearchDebounce {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEBOUNCE)
    }
}

impl SearchDebounce {
    /// Debouncer with the given idle delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Record an edit at `now`; restarts the delay.
    pub fn input(&mut self, text: &str, now: Instant) {
        self.pending = Some((text.to_string(), now + self.delay));
    }

    /// Take the pending text once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, deadline)) if *deadline <= now => self.pending.take().map(|(text, _)| text),
            _ => None,
        }
    }

    /// Drop any pending text.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether an edit is waiting for its deadline.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "prompt_input_tests.rs"]
mod tests;
