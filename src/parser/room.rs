//! Room identifier extraction

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// Block letters, an optional space, then a 2-3 digit room number
static ROOM_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?-u:\b)([a-z]{2,}\s?[0-9]{2,3})(?-u:\b)").expect("room pattern is valid"));

/// Extract the first room identifier from normalized text
///
/// The result is upper-cased with internal whitespace collapsed, so
/// "sjt 315" becomes "SJT 315" and "sjt315" becomes "SJT315".
pub fn extract_room(text: &str) -> Option<String> {
    let caps = ROOM_PATTERN.captures(text)?;
    let raw = caps.get(1)?.as_str();
    let room = raw.to_uppercase().split_whitespace().collect::<Vec<_>>().join(" ");
    debug!("Extracted room '{}' from '{}'", room, raw);
    Some(room)
}
