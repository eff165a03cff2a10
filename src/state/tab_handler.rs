//! Detail-view tabs and their keyboard navigation.
//!
//! Pure functions; wrapping at both ends.

use crate::model::KeyAction;

/// Panels of the detail view, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailTab {
    /// Generated command, explanation and raw response.
    #[default]
    Response,
    /// System prompt sent to the model.
    SystemPrompt,
    /// User prompt sent to the model.
    UserPrompt,
    /// The user's original request.
    Query,
    /// Tmux session info and terminal scrollback.
    TmuxContext,
    /// Documentation files captured from the working directory.
    Documentation,
    /// Build tools section of the user prompt.
    BuildTools,
    /// The user's claude.md preferences.
    Preferences,
}

impl DetailTab {
    /// All tabs in display order.
    pub const ALL: [DetailTab; 8] = [
        DetailTab::Response,
        DetailTab::SystemPrompt,
        DetailTab::UserPrompt,
        DetailTab::Query,
        DetailTab::TmuxContext,
        DetailTab::Documentation,
        DetailTab::BuildTools,
        DetailTab::Preferences,
    ];

    /// Tab bar title.
    pub fn title(self) -> &'static str {
        match self {
            DetailTab::Response => "Response",
            DetailTab::SystemPrompt => "System Prompt",
            DetailTab::UserPrompt => "User Prompt",
            DetailTab::Query => "Query",
            DetailTab::TmuxContext => "Tmux Context",
            DetailTab::Documentation => "Documentation",
            DetailTab::BuildTools => "Build Tools",
            DetailTab::Preferences => "Preferences",
        }
    }

    /// Position in [`DetailTab::ALL`].
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    /// Next tab, wrapping to the first.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous tab, wrapping to the last.
    pub fn prev(self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.index() + len - 1) % len]
    }
}

/// Apply a tab navigation action. Other actions leave the tab unchanged.
pub fn handle_tab_action(tab: DetailTab, action: KeyAction) -> DetailTab {
    match action {
        KeyAction::NextTab => tab.next(),
        KeyAction::PrevTab => tab.prev(),
        _ => tab,
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "tab_handler_tests.rs"]
mod tests;
