//! Date helper functions

use chrono::{DateTime, TimeZone, Utc};

/// Format a date in full format (like "January 1, 2024") in the given
/// timezone
pub fn full_date<Tz: TimeZone>(date: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.with_timezone(tz).format("%B %-d, %Y").to_string()
}

/// Format a date in ISO 8601 for `<time datetime>` attributes
pub fn date_xml<Tz: TimeZone>(date: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.with_timezone(tz)
        .format("%Y-%m-%dT%H:%M:%S%:z")
        .to_string()
}
