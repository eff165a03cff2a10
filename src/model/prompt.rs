//! Extraction of labeled sections from free-text prompts.
//!
//! Prompts embed context blocks in the form
//!
//! ```text
//! <label>
//! ---
//! <content>
//! ---
//! ```
//!
//! These helpers pull such a block back out for display.

use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

/// Label of the build-tools block in the user prompt.
pub const BUILD_TOOLS_LABEL: &str = "Available build tools and commands in current directory:";

/// Delimiter line surrounding prompt sections.
pub const SECTION_DELIMITER: &str = "---";

/// Return the trimmed content between `label` + `delimiter` and the next
/// `delimiter` line.
///
/// The label is matched case-insensitively. Returns `None` when the section
/// is missing, unterminated, or blank.
pub fn extract_labeled_section(text: &str, label: &str, delimiter: &str) -> Option<String> {
    capture_section(&section_regex(label, delimiter)?, text)
}

/// Build tools detected in the working directory, as listed in a user prompt.
///
/// Called on every redraw of the Build Tools tab, so the pattern is compiled
/// once.
pub fn extract_build_tools(user_prompt: &str) -> Option<String> {
    static BUILD_TOOLS_SECTION: LazyLock<Option<Regex>> =
        LazyLock::new(|| section_regex(BUILD_TOOLS_LABEL, SECTION_DELIMITER));

    capture_section(BUILD_TOOLS_SECTION.as_ref()?, user_prompt)
}

fn section_regex(label: &str, delimiter: &str) -> Option<Regex> {
    let pattern = format!(
        r"{label}\r?\n{delim}\r?\n([\s\S]*?)\r?\n{delim}",
        label = regex::escape(label),
        delim = regex::escape(delimiter),
    );
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .ok()
}

fn capture_section(re: &Regex, text: &str) -> Option<String> {
    let content = re.captures(text)?.get(1)?.as_str().trim();
    if content.is_empty() {
        None
    } else {
        Some(content.to_string())
    }
}
