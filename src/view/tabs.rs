//! Detail tab bar widget.
//!
//! Displays one title per `DetailTab` using ratatui's Tabs widget.
//! Selection state is managed by `AppState::detail_tab`.

use super::styles::Styles;
use crate::state::DetailTab;
use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Tabs},
    Frame,
};

/// Render the detail tab bar with `selected` highlighted.
pub fn render_tab_bar(frame: &mut Frame, area: Rect, selected: DetailTab, styles: &Styles) {
    let titles: Vec<Line> = DetailTab::ALL
        .iter()
        .map(|tab| Line::from(tab.title()))
        .collect();

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL))
        .style(styles.muted())
        .highlight_style(styles.key())
        .select(selected.index());

    frame.render_widget(tabs, area);
}
