//! Booking command interpreter
//!
//! Turns a free-text utterance such as "Reserve SJT 315 11 Sept 14:00 to 16:00"
//! into a [`BookingCommand`]. Each extraction stage scans the normalized text
//! on its own; a stage that finds nothing leaves its field empty without
//! affecting the others.

pub mod compile;
pub mod date;
pub mod intent;
pub mod room;
pub mod time;
pub mod utils;

use crate::clock::{Clock, SystemClock};
use crate::command::{BookingCommand, INTERPRETATION_TZ, TIMEZONE_LABEL};
use chrono::DateTime;
use chrono_tz::Tz;
use log::debug;
use serde_json::{json, Value};

/// Errors raised when the caller supplies something that is not text
#[derive(Debug, thiserror::Error)]
pub enum InterpretError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl InterpretError {
    /// Error body for boundary collaborators, `{"error": "..."}`
    pub fn to_payload(&self) -> Value {
        json!({ "error": self.to_string() })
    }
}

/// Interpreter bound to a time source
pub struct Interpreter {
    clock: Box<dyn Clock>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(Box::new(SystemClock))
    }
}

impl Interpreter {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Interpret an utterance at the clock's current instant
    pub fn interpret(&self, text: &str) -> BookingCommand {
        let now = self.clock.now().with_timezone(&INTERPRETATION_TZ);
        interpret_at(text, now)
    }

    /// Interpret raw bytes, which must be UTF-8
    pub fn interpret_bytes(&self, bytes: &[u8]) -> Result<BookingCommand, InterpretError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| InterpretError::InvalidInput(format!("utterance is not valid UTF-8: {}", e)))?;
        Ok(self.interpret(text))
    }

    /// Interpret a `{"text": "..."}` request payload
    pub fn interpret_request(&self, request: &Value) -> Result<BookingCommand, InterpretError> {
        let object = request
            .as_object()
            .ok_or_else(|| InterpretError::InvalidInput("request must be a JSON object".to_string()))?;

        match object.get("text") {
            Some(Value::String(text)) => Ok(self.interpret(text)),
            Some(Value::Null) | None => {
                Err(InterpretError::InvalidInput("text is required".to_string()))
            }
            Some(other) => Err(InterpretError::InvalidInput(format!(
                "text must be a string, got {}",
                json_kind(other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Interpret an utterance against an explicit "now"
///
/// `now` is used both as the command timestamp and as the reference point for
/// year rollover, so the two always agree.
pub fn interpret_at(text: &str, now: DateTime<Tz>) -> BookingCommand {
    let normalized = utils::normalize_input(text);
    debug!("Interpreting '{}'", normalized);

    let intent = intent::classify_intent(&normalized);
    let room = room::extract_room(&normalized);

    let phrase = date::extract_date_phrase(&normalized);
    let date = phrase.map(utils::capitalize_words);
    let normalized_date = phrase.and_then(|p| date::normalize_date(p, &now));

    let (start, end) = match time::extract_time_range(&normalized) {
        Some((start, end)) => (Some(start), Some(end)),
        None => (None, None),
    };

    BookingCommand {
        original: text.to_string(),
        timestamp: now,
        timezone: TIMEZONE_LABEL,
        intent,
        room,
        building: None,
        date,
        normalized_date,
        start,
        end,
        booking_id: None,
    }
}

/// Interpret an utterance using the system clock
pub fn interpret(text: &str) -> BookingCommand {
    Interpreter::default().interpret(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::command::Intent;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn fixed_interpreter() -> Interpreter {
        // 2024-12-01 00:00 in Kolkata
        let instant = Utc.with_ymd_and_hms(2024, 11, 30, 18, 30, 0).unwrap();
        Interpreter::new(Box::new(FixedClock::new(instant)))
    }

    #[test]
    fn test_full_booking_utterance() {
        let command = fixed_interpreter().interpret("Reserve SJT 315 11 Sept 14:00 to 16:00");
        assert_eq!(command.original, "Reserve SJT 315 11 Sept 14:00 to 16:00");
        assert_eq!(command.intent, Intent::Book);
        assert_eq!(command.room.as_deref(), Some("SJT 315"));
        assert_eq!(command.date.as_deref(), Some("11 Sept"));
        assert_eq!(command.normalized_date.as_deref(), Some("2025-09-11"));
        assert_eq!(command.start.as_deref(), Some("14:00"));
        assert_eq!(command.end.as_deref(), Some("16:00"));
        assert_eq!(command.building, None);
        assert_eq!(command.booking_id, None);
    }

    #[test]
    fn test_timestamp_matches_clock() {
        let command = fixed_interpreter().interpret("hi");
        assert_eq!(command.timezone, "Asia/Kolkata");
        assert_eq!(command.timestamp_rfc3339(), "2024-12-01T00:00:00.000+05:30");
    }

    #[test]
    fn test_empty_input_is_fallback() {
        let command = fixed_interpreter().interpret("   ");
        assert_eq!(command.original, "   ");
        assert_eq!(command.intent, Intent::Fallback);
        assert_eq!(command.room, None);
        assert_eq!(command.date, None);
        assert_eq!(command.normalized_date, None);
        assert_eq!(command.start, None);
        assert_eq!(command.end, None);
    }

    #[test]
    fn test_interpret_bytes_rejects_invalid_utf8() {
        let interpreter = fixed_interpreter();
        let result = interpreter.interpret_bytes(&[0x62, 0x6f, 0xff, 0xfe]);
        assert!(matches!(result, Err(InterpretError::InvalidInput(_))));

        let command = interpreter.interpret_bytes(b"book sjt315").unwrap();
        assert_eq!(command.room.as_deref(), Some("SJT315"));
    }

    #[test]
    fn test_interpret_request() {
        let interpreter = fixed_interpreter();

        let command = interpreter.interpret_request(&json!({ "text": "cancel tt 101" })).unwrap();
        assert_eq!(command.intent, Intent::Cancel);
        assert_eq!(command.room.as_deref(), Some("TT 101"));

        for bad in [json!({ "text": 42 }), json!({ "text": null }), json!({}), json!("book")] {
            let err = interpreter.interpret_request(&bad).unwrap_err();
            assert!(matches!(err, InterpretError::InvalidInput(_)), "{:?}", bad);
        }
    }

    #[test]
    fn test_error_payload() {
        let err = InterpretError::InvalidInput("text is required".to_string());
        assert_eq!(err.to_payload(), json!({ "error": "Invalid input: text is required" }));
    }
}
