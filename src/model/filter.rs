//! List query parameters (pure).
//!
//! `FilterParams` is the value behind every list request. It has no identity
//! of its own: it is rebuilt for each request and round-trips through a URL
//! query string, which is how a filtered view is shared or restored.

use super::log::FinalStatus;
use chrono::{DateTime, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// Sort field used when none is set.
pub const DEFAULT_SORT: &str = "timestamp";

// ===== SortOrder =====

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending (default).
    #[default]
    Desc,
}

impl SortOrder {
    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

impl FromStr for SortOrder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(()),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ===== SortField =====

/// Columns the list can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    /// User query text (case-insensitive on the server).
    Query,
    /// Final status.
    Status,
    /// Model tag.
    Model,
    /// Session timestamp.
    Timestamp,
}

impl SortField {
    /// Columns in display order.
    pub const ALL: [SortField; 4] = [
        SortField::Query,
        SortField::Status,
        SortField::Model,
        SortField::Timestamp,
    ];

    /// Wire name sent as `sort=`.
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Query => "query",
            SortField::Status => "status",
            SortField::Model => "model",
            SortField::Timestamp => "timestamp",
        }
    }

    /// Column header label.
    pub fn label(self) -> &'static str {
        match self {
            SortField::Query => "Query",
            SortField::Status => "Status",
            SortField::Model => "Model",
            SortField::Timestamp => "Time",
        }
    }
}

// ===== FilterKey =====

/// One settable field of [`FilterParams`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKey {
    /// `status`
    Status,
    /// `model`
    Model,
    /// `search`
    Search,
    /// `from`
    From,
    /// `to`
    To,
    /// `sort`
    Sort,
    /// `order`
    Order,
    /// `limit`
    Limit,
    /// `offset`
    Offset,
}

impl FilterKey {
    /// All keys in query-string order.
    pub const ALL: [FilterKey; 9] = [
        FilterKey::Status,
        FilterKey::Model,
        FilterKey::Search,
        FilterKey::From,
        FilterKey::To,
        FilterKey::Sort,
        FilterKey::Order,
        FilterKey::Limit,
        FilterKey::Offset,
    ];

    /// Query parameter name.
    pub fn as_str(self) -> &'static str {
        match self {
            FilterKey::Status => "status",
            FilterKey::Model => "model",
            FilterKey::Search => "search",
            FilterKey::From => "from",
            FilterKey::To => "to",
            FilterKey::Sort => "sort",
            FilterKey::Order => "order",
            FilterKey::Limit => "limit",
            FilterKey::Offset => "offset",
        }
    }

    /// Whether changing this key sends pagination back to the first page.
    pub fn resets_offset(self) -> bool {
        !matches!(self, FilterKey::Limit | FilterKey::Offset)
    }
}

impl FromStr for FilterKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or(())
    }
}

// ===== Date bounds =====

/// Which end of a date range a value bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    /// Inclusive lower bound, start of day.
    Start,
    /// Inclusive upper bound, end of day.
    End,
}

/// Expand a date-only value (`YYYY-MM-DD`) to a full UTC timestamp.
///
/// `Start` becomes `T00:00:00Z`, `End` becomes `T23:59:59Z`. Anything that is
/// not a bare date is returned trimmed and otherwise untouched.
pub fn normalize_date_bound(value: &str, bound: DateBound) -> String {
    let trimmed = value.trim();
    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => match bound {
            DateBound::Start => format!("{date}T00:00:00Z"),
            DateBound::End => format!("{date}T23:59:59Z"),
        },
        Err(_) => trimmed.to_string(),
    }
}

/// Whether `value` is usable as a time bound: a calendar date
/// (`YYYY-MM-DD`) or an RFC 3339 timestamp.
pub fn is_valid_date_bound(value: &str) -> bool {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || DateTime::parse_from_rfc3339(value).is_ok()
}

/// Date portion of a bound for display (`2024-01-15T00:00:00Z` → `2024-01-15`).
pub fn date_part(value: &str) -> &str {
    value.split('T').next().unwrap_or(value)
}

// ===== FilterParams =====

/// Query parameters for the log list.
///
/// Absence of a field means "unconstrained". Setters normalize empty strings
/// and unparseable typed values to absence, so no field ever holds `""`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterParams {
    /// Final status filter.
    pub status: Option<FinalStatus>,
    /// Model tag filter.
    pub model: Option<String>,
    /// Free-text search.
    pub search: Option<String>,
    /// Inclusive lower time bound (ISO-8601).
    pub from: Option<String>,
    /// Inclusive upper time bound (ISO-8601).
    pub to: Option<String>,
    /// Sort field name.
    pub sort: Option<String>,
    /// Sort direction.
    pub order: Option<SortOrder>,
    /// Page size (positive).
    pub limit: Option<u32>,
    /// Rows to skip (positive; zero is stored as absence).
    pub offset: Option<u32>,
}

impl Default for FilterParams {
    /// `sort=timestamp`, `order=desc`, nothing else set.
    fn default() -> Self {
        Self {
            status: None,
            model: None,
            search: None,
            from: None,
            to: None,
            sort: Some(DEFAULT_SORT.to_string()),
            order: Some(SortOrder::Desc),
            limit: None,
            offset: None,
        }
    }
}

impl FilterParams {
    /// Store one field, normalizing the raw value.
    ///
    /// Does not touch any other field; offset reset policy lives in
    /// `FilterState::set_filter`.
    pub fn assign(&mut self, key: FilterKey, value: Option<&str>) {
        let value = value.map(str::trim).filter(|v| !v.is_empty());
        match key {
            FilterKey::Status => self.status = value.and_then(|v| v.parse().ok()),
            FilterKey::Model => self.model = value.map(str::to_string),
            FilterKey::Search => self.search = value.map(str::to_string),
            FilterKey::From => self.from = date_bound(value),
            FilterKey::To => self.to = date_bound(value),
            FilterKey::Sort => self.sort = value.map(str::to_string),
            FilterKey::Order => self.order = value.and_then(|v| v.parse().ok()),
            FilterKey::Limit => self.limit = value.and_then(parse_positive),
            FilterKey::Offset => self.offset = value.and_then(parse_positive),
        }
    }

    /// Raw string value of one field, if present.
    pub fn get(&self, key: FilterKey) -> Option<String> {
        match key {
            FilterKey::Status => self.status.map(|s| s.as_str().to_string()),
            FilterKey::Model => self.model.clone(),
            FilterKey::Search => self.search.clone(),
            FilterKey::From => self.from.clone(),
            FilterKey::To => self.to.clone(),
            FilterKey::Sort => self.sort.clone(),
            FilterKey::Order => self.order.map(|o| o.as_str().to_string()),
            FilterKey::Limit => self.limit.map(|n| n.to_string()),
            FilterKey::Offset => self.offset.map(|n| n.to_string()),
        }
    }

    /// Effective sort field (`timestamp` when unset).
    pub fn sort_field(&self) -> &str {
        self.sort.as_deref().unwrap_or(DEFAULT_SORT)
    }

    /// Effective sort order (`desc` when unset).
    pub fn sort_order(&self) -> SortOrder {
        self.order.unwrap_or_default()
    }

    /// Effective offset (zero when unset).
    pub fn offset_or_zero(&self) -> u32 {
        self.offset.unwrap_or(0)
    }

    /// Query parameters to send, in a stable order.
    ///
    /// Absent and empty fields are omitted entirely. Date-only `from`/`to`
    /// values are widened to start/end-of-day timestamps.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        FilterKey::ALL
            .into_iter()
            .filter_map(|key| {
                let value = self.get(key)?;
                if value.trim().is_empty() {
                    return None;
                }
                let value = match key {
                    FilterKey::From => normalize_date_bound(&value, DateBound::Start),
                    FilterKey::To => normalize_date_bound(&value, DateBound::End),
                    _ => value,
                };
                Some((key.as_str(), value))
            })
            .collect()
    }

    /// Percent-encoded query string without a leading `?`.
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.query_pairs() {
            serializer.append_pair(key, &value);
        }
        serializer.finish()
    }

    /// Rebuild filter state from a query string.
    ///
    /// Starts from the defaults, so a string without `sort`/`order` still
    /// sorts by newest first. Unknown keys are ignored; a leading `?` is
    /// accepted.
    pub fn from_query_str(query: &str) -> Self {
        let query = query.trim().trim_start_matches('?');
        let mut params = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            if let Ok(key) = key.parse::<FilterKey>() {
                params.assign(key, Some(&value));
            }
        }
        params
    }
}

fn date_bound(value: Option<&str>) -> Option<String> {
    value.filter(|v| is_valid_date_bound(v)).map(str::to_string)
}

fn parse_positive(value: &str) -> Option<u32> {
    value.parse::<u32>().ok().filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sorts_by_timestamp_desc_and_nothing_else() {
        let params = FilterParams::default();
        assert_eq!(params.sort.as_deref(), Some("timestamp"));
        assert_eq!(params.order, Some(SortOrder::Desc));
        assert_eq!(params.status, None);
        assert_eq!(params.model, None);
        assert_eq!(params.search, None);
        assert_eq!(params.from, None);
        assert_eq!(params.to, None);
        assert_eq!(params.limit, None);
        assert_eq!(params.offset, None);
    }

    #[test]
    fn assign_empty_string_clears_field() {
        let mut params = FilterParams::default();
        params.assign(FilterKey::Search, Some("docker"));
        params.assign(FilterKey::Search, Some(""));
        assert_eq!(params.search, None);
    }

    #[test]
    fn assign_unknown_status_normalizes_to_absent() {
        let mut params = FilterParams::default();
        params.assign(FilterKey::Status, Some("accepted"));
        params.assign(FilterKey::Status, Some("pending"));
        assert_eq!(params.status, None);
    }

    #[test]
    fn assign_offset_zero_is_absent() {
        let mut params = FilterParams::default();
        params.assign(FilterKey::Offset, Some("0"));
        assert_eq!(params.offset, None);
    }

    #[test]
    fn assign_non_positive_limit_is_absent() {
        let mut params = FilterParams::default();
        params.assign(FilterKey::Limit, Some("-5"));
        assert_eq!(params.limit, None);
        params.assign(FilterKey::Limit, Some("20"));
        assert_eq!(params.limit, Some(20));
    }

    #[test]
    fn query_pairs_omit_absent_and_empty_fields() {
        let params = FilterParams {
            status: Some(FinalStatus::Accepted),
            search: Some(String::new()),
            sort: None,
            order: None,
            ..FilterParams::default()
        };
        let pairs = params.query_pairs();
        assert_eq!(pairs, vec![("status", "accepted".to_string())]);
    }

    #[test]
    fn query_pairs_widen_date_only_bounds() {
        let params = FilterParams {
            from: Some("2024-01-15".to_string()),
            to: Some("2024-01-20".to_string()),
            ..FilterParams::default()
        };
        let pairs = params.query_pairs();
        assert!(pairs.contains(&("from", "2024-01-15T00:00:00Z".to_string())));
        assert!(pairs.contains(&("to", "2024-01-20T23:59:59Z".to_string())));
    }

    #[test]
    fn query_pairs_keep_full_timestamps() {
        let params = FilterParams {
            from: Some("2024-01-15T08:00:00Z".to_string()),
            ..FilterParams::default()
        };
        assert!(params
            .query_pairs()
            .contains(&("from", "2024-01-15T08:00:00Z".to_string())));
    }

    #[test]
    fn normalize_date_bound_passes_through_garbage() {
        assert_eq!(normalize_date_bound(" yesterday ", DateBound::Start), "yesterday");
    }

    #[test]
    fn assign_rejects_impossible_dates() {
        let mut params = FilterParams::default();
        params.assign(FilterKey::From, Some("2024-01-15"));
        params.assign(FilterKey::From, Some("2024-13-45"));
        assert_eq!(params.from, None);
        params.assign(FilterKey::To, Some("yesterday"));
        assert_eq!(params.to, None);
        assert!(!params.to_query_string().contains("from="));
    }

    #[test]
    fn assign_accepts_dates_and_timestamps() {
        let mut params = FilterParams::default();
        params.assign(FilterKey::From, Some(" 2024-02-29 "));
        params.assign(FilterKey::To, Some("2024-03-01T12:30:00+02:00"));
        assert_eq!(params.from.as_deref(), Some("2024-02-29"));
        assert_eq!(params.to.as_deref(), Some("2024-03-01T12:30:00+02:00"));
        assert!(!is_valid_date_bound("2023-02-29"));
    }

    #[test]
    fn date_part_strips_time() {
        assert_eq!(date_part("2024-01-15T23:59:59Z"), "2024-01-15");
        assert_eq!(date_part("2024-01-15"), "2024-01-15");
    }

    #[test]
    fn query_string_is_percent_encoded() {
        let params = FilterParams {
            search: Some("git log & grep".to_string()),
            sort: None,
            order: None,
            ..FilterParams::default()
        };
        assert_eq!(params.to_query_string(), "search=git+log+%26+grep");
    }

    #[test]
    fn from_query_str_restores_shared_view() {
        let params = FilterParams::from_query_str("?status=rejected&model=opus&sort=model&order=asc&offset=40");
        assert_eq!(params.status, Some(FinalStatus::Rejected));
        assert_eq!(params.model.as_deref(), Some("opus"));
        assert_eq!(params.sort.as_deref(), Some("model"));
        assert_eq!(params.order, Some(SortOrder::Asc));
        assert_eq!(params.offset, Some(40));
    }

    #[test]
    fn from_query_str_defaults_sort_when_missing() {
        let params = FilterParams::from_query_str("search=ssh");
        assert_eq!(params.sort_field(), "timestamp");
        assert_eq!(params.sort_order(), SortOrder::Desc);
        assert_eq!(params.search.as_deref(), Some("ssh"));
    }

    #[test]
    fn from_query_str_ignores_unknown_keys() {
        let params = FilterParams::from_query_str("page=3&status=quit");
        assert_eq!(params.status, Some(FinalStatus::Quit));
    }

    #[test]
    fn query_string_round_trips() {
        let mut params = FilterParams::default();
        params.assign(FilterKey::Search, Some("find . -name '*.rs'"));
        params.assign(FilterKey::Model, Some("haiku"));
        params.assign(FilterKey::Limit, Some("25"));
        let restored = FilterParams::from_query_str(&params.to_query_string());
        assert_eq!(restored, params);
    }

    #[test]
    fn filter_key_resets_offset_for_all_but_pagination() {
        for key in FilterKey::ALL {
            let expected = !matches!(key, FilterKey::Limit | FilterKey::Offset);
            assert_eq!(key.resets_offset(), expected, "{key:?}");
        }
    }

    #[test]
    fn sort_order_toggles() {
        assert_eq!(SortOrder::Desc.toggled(), SortOrder::Asc);
        assert_eq!(SortOrder::Asc.toggled(), SortOrder::Desc);
    }
}
