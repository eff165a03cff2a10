//! Filter/sort state manager (pure state transitions).
//!
//! Owns the single `FilterParams` value the list view is driven by. All
//! inputs are accepted and normalized; nothing here performs I/O or fails.

use crate::model::{FilterKey, FilterParams, FinalStatus, DEFAULT_SORT};

/// Model tags offered by the model filter, in cycling order.
pub const MODEL_CHOICES: [&str; 3] = ["opus", "sonnet", "haiku"];

/// The list's current query parameters with reset-on-change semantics.
///
/// # Invariants
///
/// - Changing any key other than `limit`/`offset` clears `offset`, so a
///   narrowed or re-sorted result always starts at its first page.
/// - `clear_filters` restores exactly `{sort: timestamp, order: desc}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    params: FilterParams,
}

impl FilterState {
    /// Start from explicit parameters (e.g. parsed from `--query`).
    pub fn new(params: FilterParams) -> Self {
        Self { params }
    }

    /// Current parameters.
    pub fn params(&self) -> &FilterParams {
        &self.params
    }

    /// Set or clear one field.
    ///
    /// `None` and empty strings clear the field. Unless `key` is `limit` or
    /// `offset`, the offset is cleared as well.
    pub fn set_filter(&mut self, key: FilterKey, value: Option<&str>) {
        self.params.assign(key, value);
        if key.resets_offset() {
            self.params.offset = None;
        }
    }

    /// Reset to the default state.
    pub fn clear_filters(&mut self) {
        self.params = FilterParams::default();
    }

    /// Sort by `field`.
    ///
    /// Sorting by the current field toggles the order; switching fields always
    /// starts descending. Either way pagination returns to the first page.
    /// A blank field is ignored.
    pub fn set_sort(&mut self, field: &str) {
        let field = field.trim();
        if field.is_empty() {
            return;
        }

        if self.params.sort_field() == field {
            let order = self.params.sort_order().toggled();
            self.params.order = Some(order);
        } else {
            self.params.sort = Some(field.to_string());
            self.params.order = Some(Default::default());
        }
        self.params.offset = None;
    }

    /// Cycle the status filter: All → accepted → rejected → quit → All.
    pub fn cycle_status(&mut self) {
        let next = match self.params.status {
            None => Some(FinalStatus::Accepted),
            Some(FinalStatus::Accepted) => Some(FinalStatus::Rejected),
            Some(FinalStatus::Rejected) => Some(FinalStatus::Quit),
            Some(FinalStatus::Quit) => None,
        };
        self.set_filter(FilterKey::Status, next.map(FinalStatus::as_str));
    }

    /// Cycle the model filter through [`MODEL_CHOICES`] and back to All.
    ///
    /// A model not in the list (e.g. from a shared query) cycles to All.
    pub fn cycle_model(&mut self) {
        let next = match self.params.model.as_deref() {
            None => Some(MODEL_CHOICES[0]),
            Some(current) => MODEL_CHOICES
                .iter()
                .position(|m| *m == current)
                .and_then(|i| MODEL_CHOICES.get(i + 1).copied()),
        };
        self.set_filter(FilterKey::Model, next);
    }

    /// Advance one page. Returns `false` (no change) on the last page.
    pub fn next_page(&mut self, total: u64, page_size: u32) -> bool {
        if page_size == 0 {
            return false;
        }
        let next = u64::from(self.params.offset_or_zero()) + u64::from(page_size);
        if next >= total {
            return false;
        }
        self.set_filter(FilterKey::Offset, Some(&next.to_string()));
        true
    }

    /// Go back one page. Returns `false` (no change) on the first page.
    pub fn prev_page(&mut self, page_size: u32) -> bool {
        let current = self.params.offset_or_zero();
        if current == 0 {
            return false;
        }
        let prev = current.saturating_sub(page_size);
        self.set_filter(FilterKey::Offset, Some(&prev.to_string()));
        true
    }

    /// Whether any narrowing filter (status, model, search, dates) is set.
    pub fn has_active_filters(&self) -> bool {
        let p = &self.params;
        p.status.is_some()
            || p.model.is_some()
            || p.search.is_some()
            || p.from.is_some()
            || p.to.is_some()
    }

    /// Whether the sort differs from newest-first.
    pub fn is_custom_sort(&self) -> bool {
        self.params.sort_field() != DEFAULT_SORT || self.params.sort_order() != Default::default()
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "filter_state_tests.rs"]
mod tests;
