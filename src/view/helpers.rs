//! Small text helpers shared by the widgets.

use ratatui::{
    style::Style,
    text::{Line, Span},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// A blank line.
pub fn empty_line() -> Line<'static> {
    Line::from("")
}

/// `label: value` with the label styled.
pub fn key_value_line(label: &str, value: impl Into<String>, label_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), label_style),
        Span::raw(value.into()),
    ])
}

/// `1 log` / `3 logs`.
pub fn pluralize(count: u64, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// First line of `text` (table cells show one line).
pub fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}

/// Cut `text` to at most `max_width` display columns, ending in `…` when
/// shortened. Only the first line is kept.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    let first_line = text.lines().next().unwrap_or("");
    if first_line.width() <= max_width {
        return first_line.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in first_line.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Split multi-line content into owned lines with one style.
pub fn text_lines(text: &str, style: Style) -> Vec<Line<'static>> {
    text.lines()
        .map(|line| Line::styled(line.to_string(), style))
        .collect()
}

/// Rows `lines` occupy once wrapped at `width` columns.
///
/// Character-wrapping estimate; word wrapping can add a row now and then,
/// which at worst leaves the last line one scroll step away.
pub fn wrapped_height(lines: &[Line<'_>], width: u16) -> usize {
    let width = usize::from(width.max(1));
    lines
        .iter()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum()
}
