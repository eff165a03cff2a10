//! Relative and absolute timestamp formatting.

use chrono::{DateTime, Local, Utc};

/// How the list shows session times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeDisplay {
    /// "5m ago", "3d ago".
    #[default]
    Relative,
    /// Local date and time.
    Absolute,
}

impl TimeDisplay {
    /// Switch between relative and absolute.
    pub fn toggled(self) -> Self {
        match self {
            TimeDisplay::Relative => TimeDisplay::Absolute,
            TimeDisplay::Absolute => TimeDisplay::Relative,
        }
    }

    /// Format `ts` in this mode, relative to `now`.
    pub fn format(self, ts: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
        match self {
            TimeDisplay::Relative => format_time_ago(ts, now),
            TimeDisplay::Absolute => format_absolute(ts),
        }
    }
}

/// Human relative time: `just now`, `12m ago`, `5h ago`, `3d ago`, then the
/// local calendar date once a week has passed.
///
/// Timestamps in the future (clock skew) read as `just now`.
pub fn format_time_ago(ts: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(*ts);
    let seconds = diff.num_seconds();
    let minutes = diff.num_minutes();
    let hours = diff.num_hours();
    let days = diff.num_days();

    if seconds < 60 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else if days < 7 {
        format!("{days}d ago")
    } else {
        ts.with_timezone(&Local).format("%Y-%m-%d").to_string()
    }
}

/// Local date and time, `YYYY-MM-DD HH:MM:SS`.
pub fn format_absolute(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn under_a_minute_is_just_now() {
        let ts = now() - Duration::seconds(59);
        assert_eq!(format_time_ago(&ts, &now()), "just now");
    }

    #[test]
    fn future_timestamp_is_just_now() {
        let ts = now() + Duration::minutes(5);
        assert_eq!(format_time_ago(&ts, &now()), "just now");
    }

    #[test]
    fn minutes_ago() {
        let ts = now() - Duration::minutes(12);
        assert_eq!(format_time_ago(&ts, &now()), "12m ago");
    }

    #[test]
    fn hours_ago() {
        let ts = now() - Duration::minutes(5 * 60 + 59);
        assert_eq!(format_time_ago(&ts, &now()), "5h ago");
    }

    #[test]
    fn days_ago() {
        let ts = now() - Duration::days(6);
        assert_eq!(format_time_ago(&ts, &now()), "6d ago");
    }

    #[test]
    fn a_week_or_more_shows_date() {
        let ts = now() - Duration::days(30);
        let formatted = format_time_ago(&ts, &now());
        // Local timezone decides the exact day; the shape is fixed
        assert_eq!(formatted.len(), 10, "got {formatted}");
        assert!(formatted.starts_with("2023-12-1"), "got {formatted}");
    }

    #[test]
    fn absolute_has_date_and_time() {
        let formatted = format_absolute(&now());
        assert_eq!(formatted.len(), 19, "got {formatted}");
        assert_eq!(&formatted[4..5], "-");
        assert_eq!(&formatted[13..14], ":");
    }

    #[test]
    fn display_mode_toggles() {
        assert_eq!(TimeDisplay::default(), TimeDisplay::Relative);
        assert_eq!(TimeDisplay::Relative.toggled(), TimeDisplay::Absolute);
        assert_eq!(TimeDisplay::Absolute.toggled(), TimeDisplay::Relative);
    }
}
