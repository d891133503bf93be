// Display formatting for rates and date labels
use chrono::{Datelike, NaiveDate};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_PERCENT_DIGITS: usize = 2;

/// Formats a rate with a trailing `%`; missing or NaN values render as `-`.
pub fn format_percent(value: Option<f64>, digits: usize) -> String {
    match value {
        Some(v) if !v.is_nan() => format!("{:.*}%", digits, v),
        _ => "-".to_string(),
    }
}

/// Y-axis tick label.
pub fn format_axis_percent(value: Option<f64>) -> String {
    format_percent(value, 1)
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

/// X-axis label as `DD.MM`. Strings that are not ISO dates come back unchanged.
pub fn format_date_label(s: &str) -> String {
    match parse_date(s) {
        Some(date) => format!("{:02}.{:02}", date.day(), date.month()),
        None => s.to_string(),
    }
}
