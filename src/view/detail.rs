//! Detail view: session header, tab bar and the active tab's content.
//!
//! Line building is pure and tested directly; `render_detail` lays the
//! pieces out and reports how far the content can scroll.

use super::constants::{MAX_HISTORY_LINES, TAB_BAR_HEIGHT};
use super::helpers::{empty_line, key_value_line, pluralize, text_lines, wrapped_height};
use super::styles::{status_label, Styles};
use super::tabs::render_tab_bar;
use crate::model::{
    extract_build_tools, format_absolute, format_time_ago, Iteration, ModelInput, ModelOutput,
    SessionLog,
};
use crate::state::{AppState, DetailTab};
use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const NO_DOCUMENTATION: &str = "No documentation files found (README.md, CLAUDE.md, AGENTS.md)";
const NO_BUILD_TOOLS: &str = "No build tools detected in the current directory";
const NO_PREFERENCES: &str = "No user preferences configured (claude.md)";
const PREFERENCES_SOURCE: &str = "User preferences from ~/.config/cmd/claude.md";

/// Render the detail screen for whatever `state.detail` holds.
///
/// Returns the largest scroll offset that still shows content.
pub fn render_detail(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    styles: &Styles,
    now: DateTime<Utc>,
) -> u16 {
    let Some(log) = state.detail.data() else {
        let lines = placeholder_lines(state, styles);
        frame.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Log ")),
            area,
        );
        return 0;
    };

    let header = header_lines(log, styles, now);
    let header_height = u16::try_from(header.len())
        .unwrap_or(u16::MAX)
        .saturating_add(2);
    let chunks = Layout::vertical([
        Constraint::Length(header_height),
        Constraint::Length(TAB_BAR_HEIGHT),
        Constraint::Min(1),
    ])
    .split(area);

    let title = format!(" {} ", log.id);
    frame.render_widget(
        Paragraph::new(header)
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: false }),
        chunks[0],
    );

    render_tab_bar(frame, chunks[1], state.detail_tab, styles);

    let content = tab_lines(log, state.detail_tab, styles);
    let content_area = chunks[2];
    let total = wrapped_height(&content, content_area.width);
    let max_scroll =
        u16::try_from(total.saturating_sub(usize::from(content_area.height))).unwrap_or(u16::MAX);

    frame.render_widget(
        Paragraph::new(content)
            .wrap(Wrap { trim: false })
            .scroll((state.detail_scroll.min(max_scroll), 0)),
        content_area,
    );

    max_scroll
}

/// What to show while the record is loading or after it failed.
fn placeholder_lines(state: &AppState, styles: &Styles) -> Vec<Line<'static>> {
    if let Some(error) = state.detail.error() {
        vec![
            Line::styled(format!("Error: {error}"), styles.error()),
            empty_line(),
            Line::styled("Press Esc to go back to the list", styles.muted()),
        ]
    } else {
        vec![Line::styled("Loading log details...", styles.muted())]
    }
}

/// Query, timing, outcome and (for multi-attempt sessions) iteration history.
pub fn header_lines(log: &SessionLog, styles: &Styles, now: DateTime<Utc>) -> Vec<Line<'static>> {
    let meta = &log.metadata;
    let separator = || Span::styled(" · ", styles.muted());

    let mut lines = vec![
        Line::styled(log.user_query.clone(), styles.header()),
        Line::from(vec![
            Span::raw(format!(
                "{} ({})",
                format_absolute(&meta.timestamp),
                format_time_ago(&meta.timestamp, &now)
            )),
            separator(),
            Span::raw(pluralize(u64::from(meta.iteration_count), "iteration")),
            separator(),
            Span::styled(status_label(meta.final_status), styles.status(meta.final_status)),
            separator(),
            Span::styled(meta.model.clone(), styles.model(&meta.model)),
        ]),
    ];

    if let Some(feedback) = meta.final_feedback.as_deref().filter(|f| !f.trim().is_empty()) {
        lines.push(key_value_line(
            "Final feedback",
            format!("\"{feedback}\""),
            styles.muted(),
        ));
    }

    if log.iterations.len() > 1 {
        lines.push(empty_line());
        lines.push(Line::styled("Iteration History", styles.header()));
        // The most recent iterations stay visible; older ones collapse
        let hidden = log.iterations.len().saturating_sub(MAX_HISTORY_LINES);
        if hidden > 0 {
            let noun = if hidden == 1 { "iteration" } else { "iterations" };
            lines.push(Line::styled(
                format!("  … {hidden} earlier {noun}"),
                styles.muted(),
            ));
        }
        lines.extend(
            log.iterations
                .iter()
                .enumerate()
                .skip(hidden)
                .map(|(i, iteration)| history_line(i + 1, iteration, styles)),
        );
    }

    lines
}

fn history_line(number: usize, iteration: &Iteration, styles: &Styles) -> Line<'static> {
    let mut spans = vec![Span::styled(format!("  #{number} "), styles.key())];
    if !iteration.feedback.trim().is_empty() {
        spans.push(Span::styled(
            format!("Feedback: \"{}\" ", iteration.feedback.trim()),
            styles.muted(),
        ));
    }
    let command = iteration.model_output.command.trim();
    if command.is_empty() {
        spans.push(Span::styled("No command generated", styles.muted()));
    } else {
        spans.push(Span::styled(command.to_string(), styles.code()));
    }
    Line::from(spans)
}

/// Content of `tab` for `log`, taken from the most recent iteration.
pub fn tab_lines(log: &SessionLog, tab: DetailTab, styles: &Styles) -> Vec<Line<'static>> {
    let default_input = ModelInput::default();
    let default_output = ModelOutput::default();
    let (input, output) = log
        .last_iteration()
        .map(|it| (&it.model_input, &it.model_output))
        .unwrap_or((&default_input, &default_output));
    let context = &log.context_sources;

    match tab {
        DetailTab::Response => response_lines(output, styles),
        DetailTab::SystemPrompt => {
            or_placeholder(&input.system_prompt, "No system prompt available", styles)
        }
        DetailTab::UserPrompt => {
            or_placeholder(&input.user_prompt, "No user prompt available", styles)
        }
        DetailTab::Query => or_placeholder(&log.user_query, "No user query available", styles),
        DetailTab::TmuxContext => tmux_lines(log, styles),
        DetailTab::Documentation => {
            or_placeholder(&context.documentation_context, NO_DOCUMENTATION, styles)
        }
        DetailTab::BuildTools => match extract_build_tools(&input.user_prompt) {
            Some(tools) => text_lines(&tools, styles.code()),
            None => vec![Line::styled(NO_BUILD_TOOLS, styles.muted())],
        },
        DetailTab::Preferences => {
            if context.claude_md_content.trim().is_empty() {
                vec![Line::styled(NO_PREFERENCES, styles.muted())]
            } else {
                let mut lines = vec![
                    Line::styled(PREFERENCES_SOURCE, styles.muted()),
                    empty_line(),
                ];
                lines.extend(text_lines(&context.claude_md_content, Default::default()));
                lines
            }
        }
    }
}

fn or_placeholder(text: &str, placeholder: &str, styles: &Styles) -> Vec<Line<'static>> {
    if text.trim().is_empty() {
        vec![Line::styled(placeholder.to_string(), styles.muted())]
    } else {
        text_lines(text, Default::default())
    }
}

fn section(title: &str, styles: &Styles) -> Line<'static> {
    Line::styled(
        title.to_string(),
        styles.header().add_modifier(Modifier::UNDERLINED),
    )
}

fn response_lines(output: &ModelOutput, styles: &Styles) -> Vec<Line<'static>> {
    let mut lines = vec![section("Generated Command", styles)];
    if output.command.trim().is_empty() {
        lines.push(Line::styled("No command generated", styles.muted()));
    } else {
        lines.extend(text_lines(&output.command, styles.code()));
    }

    lines.push(empty_line());
    lines.push(section("Explanation", styles));
    lines.extend(or_placeholder(
        &output.explanation,
        "No explanation provided",
        styles,
    ));

    if !output.raw_response.trim().is_empty() {
        lines.push(empty_line());
        lines.push(section("Raw Response", styles));
        lines.extend(text_lines(&output.raw_response, styles.muted()));
    }
    lines
}

fn tmux_lines(log: &SessionLog, styles: &Styles) -> Vec<Line<'static>> {
    let tmux = &log.metadata.tmux_info;
    let mut lines = vec![section("Tmux Session Info", styles)];
    if tmux.in_tmux {
        let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
        lines.push(key_value_line("Session", field(&tmux.session), styles.muted()));
        lines.push(key_value_line("Window", field(&tmux.window), styles.muted()));
        lines.push(key_value_line("Pane", field(&tmux.pane), styles.muted()));
    } else {
        lines.push(Line::styled("Not running in tmux", styles.muted()));
    }

    lines.push(empty_line());
    lines.push(section("Terminal Scrollback", styles));
    lines.extend(or_placeholder(
        &log.context_sources.terminal_context,
        "No terminal context captured",
        styles,
    ));
    lines
}

#[cfg(test)]
#[path = "detail_tests.rs"]
mod tests;
