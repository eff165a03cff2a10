//! Screen layout rendering.
//!
//! Pure layout logic: header line, the current screen's body, the prompt
//! when open, and a status bar with keyboard hints. The help overlay is
//! drawn last, over everything else.

use super::constants::{FILTER_BAR_HEIGHT, HEADER_HEIGHT, PROMPT_HEIGHT, STATUS_BAR_HEIGHT};
use super::detail::render_detail;
use super::filter_bar::{render_filter_bar, PromptInput};
use super::help::render_help_overlay;
use super::list::render_log_list;
use super::styles::Styles;
use crate::state::{AppState, Screen};
use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const LIST_HINTS: &[(&str, &str)] = &[
    ("Enter", "open"),
    ("/", "search"),
    ("s/m", "status/model"),
    ("f/t", "dates"),
    ("1-4", "sort"),
    ("n/p", "page"),
    ("?", "help"),
    ("q", "quit"),
];

const DETAIL_HINTS: &[(&str, &str)] = &[
    ("Tab", "next tab"),
    ("j/k", "scroll"),
    ("Esc", "back"),
    ("r", "reload"),
    ("?", "help"),
    ("q", "quit"),
];

/// Render one frame.
///
/// Returns the detail content's largest scroll offset (zero on the list).
pub fn render_layout(
    frame: &mut Frame,
    state: &AppState,
    styles: &Styles,
    server: &str,
    now: DateTime<Utc>,
) -> u16 {
    let prompt_height = if state.prompt.is_some() {
        PROMPT_HEIGHT
    } else {
        0
    };
    let [header_area, body_area, prompt_area, status_area] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(prompt_height),
        Constraint::Length(STATUS_BAR_HEIGHT),
    ])
    .areas(frame.area());

    render_header(frame, header_area, state, styles, server);

    let scroll_max = match state.screen {
        Screen::Listing => {
            render_listing(frame, body_area, state, styles, now);
            0
        }
        Screen::ViewingDetail(_) => render_detail(frame, body_area, state, styles, now),
    };

    if let Some(prompt) = &state.prompt {
        frame.render_widget(
            PromptInput::new(prompt, styles).pending(state.search_debounce.is_pending()),
            prompt_area,
        );
    }

    render_status_bar(frame, status_area, state, styles);

    if state.help_visible {
        render_help_overlay(frame, styles);
    }

    scroll_max
}

fn render_listing(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    styles: &Styles,
    now: DateTime<Utc>,
) {
    let [filter_area, table_area] =
        Layout::vertical([Constraint::Length(FILTER_BAR_HEIGHT), Constraint::Min(0)]).areas(area);
    render_filter_bar(frame, filter_area, state.filters.params(), styles);
    render_log_list(frame, table_area, state, styles, now);
}

/// Render the header: app name, server, and the current location.
fn render_header(frame: &mut Frame, area: Rect, state: &AppState, styles: &Styles, server: &str) {
    let location = match state.viewed_log() {
        Some(id) => format!("log {id}"),
        None => "logs".to_string(),
    };
    let line = Line::from(vec![
        Span::styled(" cmdlv ", styles.header()),
        Span::styled(format!("{server} "), styles.muted()),
        Span::styled(format!("› {location}"), styles.accent()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Hints for the current screen, or the prompt's own keys while it is open.
pub fn keyboard_hints(state: &AppState) -> &'static [(&'static str, &'static str)] {
    if state.prompt.is_some() {
        return &[("Enter", "apply"), ("Esc", "cancel")];
    }
    match state.screen {
        Screen::Listing => LIST_HINTS,
        Screen::ViewingDetail(_) => DETAIL_HINTS,
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, styles: &Styles) {
    let mut spans = Vec::new();
    for (key, action) in keyboard_hints(state) {
        spans.push(Span::styled(format!(" {key}"), styles.key()));
        spans.push(Span::styled(format!(" {action} "), styles.muted()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

// ===== Tests =====

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
