//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crate::model::SortField;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Provides default vim-style bindings. Keys typed into an open prompt never
/// reach this table; the event loop routes them to the prompt instead.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&key).copied()
    }

    fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(KeyEvent::new(code, modifiers), action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        use KeyCode::*;
        const NONE: KeyModifiers = KeyModifiers::NONE;
        const SHIFT: KeyModifiers = KeyModifiers::SHIFT;

        let mut keys = Self {
            bindings: HashMap::new(),
        };

        // Movement
        keys.bind(Char('k'), NONE, KeyAction::MoveUp);
        keys.bind(Up, NONE, KeyAction::MoveUp);
        keys.bind(Char('j'), NONE, KeyAction::MoveDown);
        keys.bind(Down, NONE, KeyAction::MoveDown);
        keys.bind(Char('g'), NONE, KeyAction::MoveToTop);
        keys.bind(Home, NONE, KeyAction::MoveToTop);
        keys.bind(Char('G'), SHIFT, KeyAction::MoveToBottom);
        keys.bind(End, NONE, KeyAction::MoveToBottom);

        // Screens
        keys.bind(Enter, NONE, KeyAction::OpenSelected);
        keys.bind(Esc, NONE, KeyAction::Back);
        keys.bind(Backspace, NONE, KeyAction::Back);

        // Pagination
        keys.bind(Char('n'), NONE, KeyAction::NextPage);
        keys.bind(PageDown, NONE, KeyAction::NextPage);
        keys.bind(Char('p'), NONE, KeyAction::PrevPage);
        keys.bind(PageUp, NONE, KeyAction::PrevPage);

        // Filters
        keys.bind(Char('/'), NONE, KeyAction::StartSearch);
        keys.bind(Char('s'), NONE, KeyAction::CycleStatus);
        keys.bind(Char('m'), NONE, KeyAction::CycleModel);
        keys.bind(Char('f'), NONE, KeyAction::EditFromDate);
        keys.bind(Char('t'), NONE, KeyAction::EditToDate);
        keys.bind(Char('x'), NONE, KeyAction::ClearFilters);
        keys.bind(Char('a'), NONE, KeyAction::ToggleTimeDisplay);

        // Sorting by column number
        for (digit, field) in ['1', '2', '3', '4'].into_iter().zip(SortField::ALL) {
            keys.bind(Char(digit), NONE, KeyAction::SortBy(field));
        }

        // Detail tabs
        keys.bind(Tab, NONE, KeyAction::NextTab);
        keys.bind(Char('l'), NONE, KeyAction::NextTab);
        keys.bind(Char(']'), NONE, KeyAction::NextTab);
        keys.bind(BackTab, SHIFT, KeyAction::PrevTab);
        keys.bind(Char('h'), NONE, KeyAction::PrevTab);
        keys.bind(Char('['), NONE, KeyAction::PrevTab);

        // Application controls
        keys.bind(Char('r'), NONE, KeyAction::Refresh);
        keys.bind(Char('?'), NONE, KeyAction::Help);
        keys.bind(Char('q'), NONE, KeyAction::Quit);
        keys.bind(Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);

        keys
    }
}
