//! Active filter summary and the text prompt.
//!
//! The bar's bottom border carries the shareable query string; passing it
//! back with `--query` restores the same view.

use super::styles::Styles;
use crate::model::{date_part, FilterParams, SortField};
use crate::state::InputPrompt;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};

/// `?sort=timestamp&order=desc` form of the current filters.
pub fn share_query(params: &FilterParams) -> String {
    format!("?{}", params.to_query_string())
}

fn sort_label(params: &FilterParams) -> String {
    let field = params.sort_field();
    let label = SortField::ALL
        .iter()
        .find(|f| f.as_str() == field)
        .map_or(field, |f| f.label());
    format!("{label} {}", params.sort_order())
}

/// One `label: value` span pair per filter; unset filters read `All`/`-`.
pub fn filter_spans(params: &FilterParams, styles: &Styles) -> Vec<Span<'static>> {
    let status = params.status.map_or("All".to_string(), |s| s.to_string());
    let model = params.model.clone().unwrap_or_else(|| "All".to_string());
    let search = params
        .search
        .as_ref()
        .map_or("-".to_string(), |s| format!("\"{s}\""));
    let from = params.from.as_deref().map_or("-", date_part).to_string();
    let to = params.to.as_deref().map_or("-", date_part).to_string();

    let pairs = [
        ("Status", status),
        ("Model", model),
        ("Search", search),
        ("From", from),
        ("To", to),
        ("Sort", sort_label(params)),
    ];

    let mut spans = Vec::with_capacity(pairs.len() * 2);
    for (label, value) in pairs {
        spans.push(Span::styled(format!("{label}: "), styles.muted()));
        spans.push(Span::raw(format!("{value}  ")));
    }
    spans
}

/// Render the filter summary with the query string on the bottom border.
pub fn render_filter_bar(frame: &mut Frame, area: Rect, params: &FilterParams, styles: &Styles) {
    let query = Line::styled(format!(" {} ", share_query(params)), styles.muted());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Filters ")
        .title_bottom(query.right_aligned());

    frame.render_widget(
        Paragraph::new(Line::from(filter_spans(params, styles))).block(block),
        area,
    );
}

/// Text prompt widget.
/// Renders the buffer with an inverted cell at the cursor.
pub struct PromptInput<'a> {
    prompt: &'a InputPrompt,
    styles: &'a Styles,
    pending: bool,
}

impl<'a> PromptInput<'a> {
    /// Create new PromptInput widget.
    pub fn new(prompt: &'a InputPrompt, styles: &'a Styles) -> Self {
        Self {
            prompt,
            styles,
            pending: false,
        }
    }

    /// Mark the text as typed but not yet applied.
    pub fn pending(mut self, pending: bool) -> Self {
        self.pending = pending;
        self
    }
}

impl Widget for PromptInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let before: String = self.prompt.buffer.chars().take(self.prompt.cursor).collect();
        let mut after = self.prompt.buffer.chars().skip(self.prompt.cursor);
        let cursor_char = after.next().map_or(" ".to_string(), String::from);
        let after: String = after.collect();

        let line = Line::from(vec![
            Span::raw(before),
            Span::styled(
                cursor_char,
                Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD),
            ),
            Span::raw(after),
        ]);

        let marker = if self.pending { " …" } else { "" };
        let title = format!(
            " {}{marker} (Enter apply, Esc cancel) ",
            self.prompt.target.label()
        );
        let mut block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(self.styles.accent());
        if self.prompt.invalid {
            block = block
                .title_bottom(Line::styled(" Not a valid date ", self.styles.error()))
                .border_style(self.styles.error());
        }
        Paragraph::new(line).block(block).render(area, buf);
    }
}
