//! Time range extraction
//!
//! A range is two clock tokens joined by "to" or "-", e.g. "2pm to 4pm",
//! "9 to 9:30" or "14:00-16:00". Both sides must be present; a lone time is
//! not extracted.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// Hour, optional separator, optional minutes, optional meridiem, twice
static TIME_RANGE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"([0-9]{1,2})[:.]?([0-9]{0,2})\s?(am|pm)?\s*(?:to|-)\s*([0-9]{1,2})[:.]?([0-9]{0,2})\s?(am|pm)?",
    )
    .expect("time range pattern is valid")
});

/// Convert a clock reading to 24-hour `(hour, minute)`
///
/// Returns `None` when the result is not a valid time of day.
pub fn to_24_hour(hour: u32, minute: u32, meridiem: Option<&str>) -> Option<(u32, u32)> {
    let hour_24 = match (hour, meridiem) {
        (h, Some("pm")) if h < 12 => h + 12,
        (12, Some("am")) => 0,
        (h, _) => h,
    };

    if hour_24 < 24 && minute < 60 {
        Some((hour_24, minute))
    } else {
        None
    }
}

/// Normalize one side of a range to zero-padded `HH:MM`
pub fn normalize_time(hour: &str, minute: &str, meridiem: Option<&str>) -> Option<String> {
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = if minute.is_empty() { 0 } else { minute.parse().ok()? };
    let (hour, minute) = to_24_hour(hour, minute, meridiem)?;
    Some(format!("{:02}:{:02}", hour, minute))
}

/// Extract the first time range from normalized text as `(start, end)`
pub fn extract_time_range(text: &str) -> Option<(String, String)> {
    let caps = TIME_RANGE_PATTERN.captures(text)?;
    debug!("Found time range '{}'", caps.get(0).map_or("", |m| m.as_str()));

    let side = |h: usize, m: usize, ampm: usize| {
        normalize_time(
            caps.get(h).map_or("", |c| c.as_str()),
            caps.get(m).map_or("", |c| c.as_str()),
            caps.get(ampm).map(|c| c.as_str()),
        )
    };

    match (side(1, 2, 3), side(4, 5, 6)) {
        (Some(start), Some(end)) => {
            debug!("Normalized time range {} -> {}", start, end);
            Some((start, end))
        }
        _ => {
            debug!("Time range is out of bounds, ignoring it");
            None
        }
    }
}
