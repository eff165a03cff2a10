//! Domain-level keyboard actions independent of key bindings.

use super::filter::SortField;

/// Domain-level actions that can be mapped to key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
/// Actions that only make sense on one screen are ignored on the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Movement
    /// Move list selection up / scroll detail up. Default: k/↑
    MoveUp,
    /// Move list selection down / scroll detail down. Default: j/↓
    MoveDown,
    /// Jump to first row / top of detail. Default: g/Home
    MoveToTop,
    /// Jump to last row / bottom of detail. Default: G/End
    MoveToBottom,

    // Navigation between screens
    /// Open the selected log in the detail view. Default: Enter
    OpenSelected,
    /// Return from detail to the list. Default: Esc/Backspace
    Back,

    // Pagination (list)
    /// Next page of results. Default: n/PageDown
    NextPage,
    /// Previous page of results. Default: p/PageUp
    PrevPage,

    // Filters (list)
    /// Open the debounced search prompt. Default: /
    StartSearch,
    /// Cycle status filter All → accepted → rejected → quit. Default: s
    CycleStatus,
    /// Cycle model filter All → opus → sonnet → haiku. Default: m
    CycleModel,
    /// Edit the lower date bound. Default: f
    EditFromDate,
    /// Edit the upper date bound. Default: t
    EditToDate,
    /// Reset all filters to defaults. Default: x
    ClearFilters,
    /// Sort by a column, toggling order when already sorted by it. Default: 1-4
    SortBy(SortField),
    /// Switch list timestamps between relative and absolute. Default: a
    ToggleTimeDisplay,

    // Detail tabs
    /// Next detail tab. Default: Tab/l/]
    NextTab,
    /// Previous detail tab. Default: Shift+Tab/h/[
    PrevTab,

    // Application
    /// Re-issue the current list or detail request. Default: r
    Refresh,
    /// Show help overlay with keyboard shortcuts. Default: ?
    Help,
    /// Exit the application. Default: q/Ctrl+c
    Quit,
}
