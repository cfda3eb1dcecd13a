use chrono::{DateTime, Utc};

/// `Monday, January 15, 2024`
#[must_use]
pub fn format_long_date(value: DateTime<Utc>) -> String {
    value.format("%A, %B %-d, %Y").to_string()
}

/// `Jan 15, 2024`
#[must_use]
pub fn format_short_date(value: DateTime<Utc>) -> String {
    value.format("%b %-d, %Y").to_string()
}

/// `Mon, Jan 15, 2024 • 09:30 AM`
#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.format("%a, %b %-d, %Y • %I:%M %p").to_string()
}

/// `09:30 AM`
#[must_use]
pub fn format_time(value: DateTime<Utc>) -> String {
    value.format("%I:%M %p").to_string()
}
