//! Log table for the list screen.

use super::constants::{MODEL_COLUMN_WIDTH, STATUS_COLUMN_WIDTH, TIME_COLUMN_WIDTH};
use super::helpers::{first_line, pluralize};
use super::styles::{status_label, Styles};
use crate::model::{FilterParams, LogSummary, SortField, SortOrder, TimeDisplay};
use crate::state::AppState;
use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Constraint, Rect},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

/// Arrow shown next to a column header: `↑`/`↓` for the active sort
/// direction, `↕` for sortable columns not currently sorted on.
pub fn sort_indicator(params: &FilterParams, field: SortField) -> &'static str {
    if params.sort_field() != field.as_str() {
        return "↕";
    }
    match params.sort_order() {
        SortOrder::Asc => "↑",
        SortOrder::Desc => "↓",
    }
}

/// Block title: the match count and visible range, or `Loading...` before
/// the first page arrives.
pub fn count_title(state: &AppState) -> String {
    let Some(page) = state.list.data() else {
        return if state.list.is_loading() {
            " Loading... ".to_string()
        } else {
            " Logs ".to_string()
        };
    };

    let mut title = format!(" {}", pluralize(page.total, "log"));
    if let Some((first, last)) = page.page_range() {
        title.push_str(&format!(" · showing {first}-{last}"));
    }
    if state.list.is_loading() {
        title.push_str(" · Loading...");
    }
    title.push(' ');
    title
}

fn header_row(params: &FilterParams, styles: &Styles) -> Row<'static> {
    let mut cells: Vec<Cell> = SortField::ALL
        .iter()
        .map(|&field| Cell::from(format!("{} {}", field.label(), sort_indicator(params, field))))
        .collect();
    cells.push(Cell::from("Command"));
    Row::new(cells).style(styles.header())
}

fn summary_row(
    summary: &LogSummary,
    styles: &Styles,
    time_display: TimeDisplay,
    now: &DateTime<Utc>,
) -> Row<'static> {
    let command = first_line(&summary.command_preview).trim();
    let command = if command.is_empty() {
        Cell::from("-").style(styles.muted())
    } else {
        Cell::from(command.to_string()).style(styles.code())
    };

    Row::new(vec![
        Cell::from(first_line(&summary.user_query).to_string()),
        Cell::from(status_label(summary.final_status)).style(styles.status(summary.final_status)),
        Cell::from(summary.model.clone()).style(styles.model(&summary.model)),
        Cell::from(time_display.format(&summary.timestamp, now)).style(styles.muted()),
        command,
    ])
}

/// Render the table, or an error/empty/loading message in its place.
pub fn render_log_list(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    styles: &Styles,
    now: DateTime<Utc>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(count_title(state));
    let rows = state.rows();

    if rows.is_empty() {
        let message = if let Some(error) = state.list.error() {
            Line::styled(format!("Error: {error}"), styles.error())
        } else if state.list.is_loading() {
            Line::styled("Loading...", styles.muted())
        } else {
            Line::styled("No logs found", styles.muted())
        };
        frame.render_widget(Paragraph::new(message).block(block), area);
        return;
    }

    let widths = [
        Constraint::Fill(2),
        Constraint::Length(STATUS_COLUMN_WIDTH),
        Constraint::Length(MODEL_COLUMN_WIDTH),
        Constraint::Length(TIME_COLUMN_WIDTH),
        Constraint::Fill(3),
    ];
    let params = state.filters.params();
    let table = Table::new(
        rows.iter()
            .map(|summary| summary_row(summary, styles, state.time_display, &now)),
        widths,
    )
    .header(header_row(params, styles))
    .block(block)
    .row_highlight_style(styles.selected_row())
    .highlight_symbol("> ");

    let mut table_state = TableState::default().with_selected(Some(state.selected));
    frame.render_stateful_widget(table, area, &mut table_state);
}
