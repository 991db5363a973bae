//! Conversion between `NaiveDateTime` and the `date` column text.

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use simpleui_shared::constants::TIMESTAMP_FORMAT;

/// Current local time, truncated to the minute the column can hold.
pub(crate) fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now)
}

pub(crate) fn format(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Layouts accepted when reading, besides [`TIMESTAMP_FORMAT`].
const EXTRA_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Parse an optional `date` column of `table`.
///
/// The column is free text.  Text that matches none of the known layouts
/// reads as `None` so one odd row never hides the rest of a listing.
pub(crate) fn parse_column(table: &str, raw: Option<String>) -> Option<NaiveDateTime> {
    let text = raw?;
    let trimmed = text.trim();

    let parsed = std::iter::once(TIMESTAMP_FORMAT)
        .chain(EXTRA_FORMATS.iter().copied())
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        });

    if parsed.is_none() {
        tracing::warn!(table, value = %text, "unreadable date column, leaving it empty");
    }
    parsed
}
