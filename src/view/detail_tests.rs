//! Tests for detail view content.

use super::*;
use crate::model::{FinalStatus, TmuxInfo};
use crate::test_harness::{fixture_time, session_log};

fn text(lines: &[Line]) -> String {
    lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn tab(log: &SessionLog, tab: DetailTab) -> String {
    text(&tab_lines(log, tab, &Styles::default()))
}

fn header(log: &SessionLog) -> String {
    text(&header_lines(log, &Styles::default(), fixture_time()))
}

#[test]
fn header_shows_outcome_and_history() {
    let output = header(&session_log("a"));
    assert!(output.starts_with("list large files"));
    assert!(output.contains("2 iterations"));
    assert!(output.contains("✓ accepted"));
    assert!(output.contains("sonnet"));
    assert!(output.contains("Iteration History"));
    assert!(output.contains("#1 du -sh *"));
    assert!(output.contains("#2 Feedback: \"sort them\" du -sh * | sort -h"));
}

#[test]
fn single_iteration_has_no_history() {
    let mut log = session_log("a");
    log.iterations.truncate(1);
    log.metadata.iteration_count = 1;
    let output = header(&log);
    assert!(output.contains("1 iteration"));
    assert!(!output.contains("Iteration History"));
}

#[test]
fn long_history_keeps_latest_iterations() {
    let mut log = session_log("a");
    let extra = log.iterations[1].clone();
    for _ in 0..6 {
        log.iterations.push(extra.clone());
    }
    let total = log.iterations.len();
    let hidden = total - MAX_HISTORY_LINES;
    let output = header(&log);

    let elided = output.find("… 3 earlier iterations").unwrap();
    let first_shown = output.find(&format!("#{} ", hidden + 1)).unwrap();
    assert!(elided < first_shown);
    assert!(output.contains(&format!("#{total} ")));
    assert!(!output.contains(&format!("#{hidden} ")));
    assert!(!output.contains("#1 "));
}

#[test]
fn single_hidden_iteration_is_singular() {
    let mut log = session_log("a");
    let extra = log.iterations[1].clone();
    while log.iterations.len() < MAX_HISTORY_LINES + 1 {
        log.iterations.push(extra.clone());
    }
    let output = header(&log);
    assert!(output.contains("… 1 earlier iteration\n"));
    assert!(!output.contains("#1 "));
}

#[test]
fn final_feedback_is_shown_when_present() {
    let mut log = session_log("a");
    log.metadata.final_status = FinalStatus::Rejected;
    log.metadata.final_feedback = Some("too dangerous".to_string());
    let output = header(&log);
    assert!(output.contains("✗ rejected"));
    assert!(output.contains("Final feedback: \"too dangerous\""));
}

#[test]
fn response_tab_uses_last_iteration() {
    let output = tab(&session_log("a"), DetailTab::Response);
    assert!(output.contains("Generated Command\ndu -sh * | sort -h"));
    assert!(output.contains("Explanation\nShows disk usage per entry"));
    assert!(output.contains("Raw Response"));
}

#[test]
fn response_tab_placeholders() {
    let mut log = session_log("a");
    log.iterations.clear();
    let output = tab(&log, DetailTab::Response);
    assert!(output.contains("No command generated"));
    assert!(output.contains("No explanation provided"));
    assert!(!output.contains("Raw Response"));
}

#[test]
fn prompt_tabs_show_prompts_or_placeholders() {
    let log = session_log("a");
    assert!(tab(&log, DetailTab::SystemPrompt).contains("shell commands"));
    assert!(tab(&log, DetailTab::UserPrompt).contains("Convert to a command"));
    assert_eq!(tab(&log, DetailTab::Query), "list large files");

    let mut empty = log.clone();
    empty.iterations.clear();
    empty.user_query = String::new();
    assert_eq!(
        tab(&empty, DetailTab::SystemPrompt),
        "No system prompt available"
    );
    assert_eq!(tab(&empty, DetailTab::UserPrompt), "No user prompt available");
    assert_eq!(tab(&empty, DetailTab::Query), "No user query available");
}

#[test]
fn tmux_tab_shows_session_fields_with_dash_for_missing() {
    let output = tab(&session_log("a"), DetailTab::TmuxContext);
    assert!(output.contains("Session: work"));
    assert!(output.contains("Window: editor"));
    assert!(output.contains("Pane: -"));
    assert!(output.contains("Terminal Scrollback\n$ ls\nfoo bar"));
}

#[test]
fn tmux_tab_outside_tmux() {
    let mut log = session_log("a");
    log.metadata.tmux_info = TmuxInfo::default();
    log.context_sources.terminal_context = String::new();
    let output = tab(&log, DetailTab::TmuxContext);
    assert!(output.contains("Not running in tmux"));
    assert!(output.contains("No terminal context captured"));
}

#[test]
fn documentation_tab_placeholder_names_files() {
    let output = tab(&session_log("a"), DetailTab::Documentation);
    assert_eq!(output, NO_DOCUMENTATION);
}

#[test]
fn build_tools_tab_extracts_section() {
    let log = session_log("a");
    assert_eq!(
        tab(&log, DetailTab::BuildTools),
        "Makefile targets: build, test"
    );

    let mut without = log;
    for iteration in &mut without.iterations {
        iteration.model_input.user_prompt = "just a query".to_string();
    }
    assert_eq!(tab(&without, DetailTab::BuildTools), NO_BUILD_TOOLS);
}

#[test]
fn preferences_tab_names_source_file() {
    let log = session_log("a");
    let output = tab(&log, DetailTab::Preferences);
    assert!(output.starts_with(PREFERENCES_SOURCE));
    assert!(output.ends_with("prefer fd over find"));

    let mut without = log;
    without.context_sources.claude_md_content = "  \n".to_string();
    assert_eq!(tab(&without, DetailTab::Preferences), NO_PREFERENCES);
}
