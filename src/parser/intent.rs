//! Keyword-based intent classification
//!
//! Rules are evaluated in order and the first rule with a matching keyword
//! wins, so an utterance mentioning both "book" and "cancel" is a booking.

use crate::command::Intent;
use log::debug;

/// Ordered classification rules
pub const INTENT_RULES: &[(Intent, &[&str])] = &[
    (Intent::Book, &["reserve", "book"]),
    (Intent::Cancel, &["cancel", "delete", "remove"]),
    (Intent::Modify, &["modify", "change", "update"]),
    (Intent::CheckAvailability, &["available", "free", "check"]),
    (Intent::Greet, &["hello", "hi", "hey"]),
];

/// Classify normalized (trimmed, lower-cased) text
pub fn classify_intent(text: &str) -> Intent {
    for (intent, keywords) in INTENT_RULES {
        if let Some(keyword) = keywords.iter().find(|k| text.contains(*k)) {
            debug!("Intent '{}' matched keyword '{}'", intent, keyword);
            return *intent;
        }
    }

    debug!("No intent keyword found, falling back");
    Intent::Fallback
}
