//! Date phrase extraction and normalization
//!
//! Phrases such as "11 sept" or "25 december" are captured verbatim and then
//! resolved to a calendar date. Utterances never carry a year, so the year is
//! chosen to make the date upcoming relative to the moment of interpretation.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone};
use chrono_tz::Tz;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u:\b)([0-9]{1,2}\s?(?:jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*)(?-u:\b)")
        .expect("date pattern is valid")
});

static DAY_MONTH_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([0-9]{1,2})\s*([a-z]+)").expect("day/month pattern is valid"));

/// Three-letter month abbreviations mapped to month numbers
pub static MONTHS: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert("jan", 1);
    map.insert("feb", 2);
    map.insert("mar", 3);
    map.insert("apr", 4);
    map.insert("may", 5);
    map.insert("jun", 6);
    map.insert("jul", 7);
    map.insert("aug", 8);
    map.insert("sep", 9);
    map.insert("oct", 10);
    map.insert("nov", 11);
    map.insert("dec", 12);
    map
});

/// Find the first "<day> <month>" phrase in normalized text
pub fn extract_date_phrase(text: &str) -> Option<&str> {
    let phrase = DATE_PATTERN.captures(text)?.get(1)?.as_str();
    debug!("Found date phrase '{}'", phrase);
    Some(phrase)
}

/// Look up a month token by its first three letters
pub fn month_number(token: &str) -> Option<u32> {
    let key: String = token.chars().take(3).collect::<String>().to_lowercase();
    MONTHS.get(key.as_str()).copied()
}

/// Resolve a day/month phrase to `YYYY-MM-DD`
///
/// The current year is tried first. If the start of that day is strictly
/// earlier than `now` the date moves to the following year. Returns `None`
/// for unknown month tokens and for days that do not exist.
pub fn normalize_date(phrase: &str, now: &DateTime<Tz>) -> Option<String> {
    let caps = DAY_MONTH_PATTERN.captures(phrase)?;
    let day: u32 = caps.get(1)?.as_str().parse().ok()?;
    let month_token = caps.get(2)?.as_str();

    let Some(month) = month_number(month_token) else {
        debug!("Unrecognized month token '{}' in '{}'", month_token, phrase);
        return None;
    };

    let year = now.year();
    let resolved = match start_of_day(year, month, day, now) {
        Some(candidate) if candidate < *now => NaiveDate::from_ymd_opt(year + 1, month, day),
        Some(candidate) => Some(candidate.date_naive()),
        None => NaiveDate::from_ymd_opt(year + 1, month, day),
    };

    match resolved {
        Some(date) => {
            let normalized = date.format("%Y-%m-%d").to_string();
            debug!("Normalized date '{}' -> {}", phrase, normalized);
            Some(normalized)
        }
        None => {
            debug!("Date phrase '{}' does not name a real day", phrase);
            None
        }
    }
}

fn start_of_day(year: i32, month: u32, day: u32, now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let midnight = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)?;
    now.timezone().from_local_datetime(&midnight).earliest()
}
