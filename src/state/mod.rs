//! UI state machine (pure).
//!
//! All state transitions are pure functions testable without TUI.

pub mod app_state;
pub mod filter_state;
pub mod load_state;
pub mod prompt_input;
pub mod tab_handler;

// Re-export for convenience
pub use app_state::{AppState, Screen};
pub use filter_state::{FilterState, MODEL_CHOICES};
pub use load_state::Loadable;
pub use prompt_input::{
    handle_backspace, handle_char_input, handle_cursor_left, handle_cursor_right, InputPrompt,
    PromptTarget, SearchDebounce, DEFAULT_SEARCH_DEBOUNCE,
};
pub use tab_handler::{handle_tab_action, DetailTab};
