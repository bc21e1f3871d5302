//! Structured booking commands produced by the interpreter
//!
//! A [`BookingCommand`] is the full result of interpreting one utterance.
//! [`BookingCommand::to_wire`] renders it into the JSON envelope consumed by
//! HTTP endpoints and front-ends.

use chrono::{DateTime, SecondsFormat};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label of the timezone every command is interpreted in
pub const TIMEZONE_LABEL: &str = "Asia/Kolkata";

/// Timezone used for timestamps and year rollover
pub const INTERPRETATION_TZ: Tz = Tz::Asia__Kolkata;

/// Purpose of an utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Book,
    Cancel,
    Modify,
    CheckAvailability,
    Greet,
    Fallback,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Book => "book",
            Intent::Cancel => "cancel",
            Intent::Modify => "modify",
            Intent::CheckAvailability => "check_availability",
            Intent::Greet => "greet",
            Intent::Fallback => "fallback",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of interpreting a single utterance
#[derive(Debug, Clone, PartialEq)]
pub struct BookingCommand {
    /// Input text exactly as supplied
    pub original: String,
    /// Moment of interpretation
    pub timestamp: DateTime<Tz>,
    pub timezone: &'static str,
    pub intent: Intent,
    pub room: Option<String>,
    /// Reserved, never populated by the interpreter
    pub building: Option<String>,
    /// Date phrase as written, with each word capitalized
    pub date: Option<String>,
    /// Date phrase resolved to `YYYY-MM-DD`
    pub normalized_date: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    /// Reserved for modify/cancel flows, never populated by the interpreter
    pub booking_id: Option<String>,
}

impl BookingCommand {
    /// RFC 3339 rendering of the interpretation moment, with offset
    pub fn timestamp_rfc3339(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, false)
    }

    /// Build the JSON envelope for this command
    ///
    /// `normalized_date` is only surfaced when `include_normalized_date` is set.
    pub fn to_wire(&self, include_normalized_date: bool) -> WireCommand<'_> {
        WireCommand {
            original: &self.original,
            now: self.timestamp_rfc3339(),
            tz: self.timezone,
            parsed: WireParsed {
                intent: self.intent,
                room: self.room.as_deref(),
                building: self.building.as_deref(),
                date: self.date.as_deref(),
                start: self.start.as_deref(),
                end: self.end.as_deref(),
                booking_id: self.booking_id.as_deref(),
                normalized_date: include_normalized_date.then_some(self.normalized_date.as_deref()),
            },
        }
    }
}

/// JSON envelope: `{original, now, tz, parsed}`
#[derive(Debug, Serialize)]
pub struct WireCommand<'a> {
    pub original: &'a str,
    pub now: String,
    pub tz: &'a str,
    pub parsed: WireParsed<'a>,
}

/// Extracted fields as exposed to collaborators
#[derive(Debug, Serialize)]
pub struct WireParsed<'a> {
    pub intent: Intent,
    pub room: Option<&'a str>,
    pub building: Option<&'a str>,
    pub date: Option<&'a str>,
    pub start: Option<&'a str>,
    pub end: Option<&'a str>,
    pub booking_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_date: Option<Option<&'a str>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> BookingCommand {
        BookingCommand {
            original: "Reserve SJT 315 11 Sept 14:00 to 16:00".to_string(),
            timestamp: INTERPRETATION_TZ.with_ymd_and_hms(2024, 12, 1, 10, 0, 0).unwrap(),
            timezone: TIMEZONE_LABEL,
            intent: Intent::Book,
            room: Some("SJT 315".to_string()),
            building: None,
            date: Some("11 Sept".to_string()),
            normalized_date: Some("2025-09-11".to_string()),
            start: Some("14:00".to_string()),
            end: Some("16:00".to_string()),
            booking_id: None,
        }
    }

    #[test]
    fn test_intent_serializes_snake_case() {
        assert_eq!(serde_json::to_value(Intent::CheckAvailability).unwrap(), json!("check_availability"));
        assert_eq!(Intent::CheckAvailability.to_string(), "check_availability");
        assert_eq!(Intent::Greet.as_str(), "greet");
    }

    #[test]
    fn test_wire_envelope_shape() {
        let command = sample();
        let value = serde_json::to_value(command.to_wire(false)).unwrap();
        assert_eq!(
            value,
            json!({
                "original": "Reserve SJT 315 11 Sept 14:00 to 16:00",
                "now": "2024-12-01T10:00:00.000+05:30",
                "tz": "Asia/Kolkata",
                "parsed": {
                    "intent": "book",
                    "room": "SJT 315",
                    "building": null,
                    "date": "11 Sept",
                    "start": "14:00",
                    "end": "16:00",
                    "booking_id": null
                }
            })
        );
    }

    #[test]
    fn test_wire_envelope_with_normalized_date() {
        let mut command = sample();
        let value = serde_json::to_value(command.to_wire(true)).unwrap();
        assert_eq!(value["parsed"]["normalized_date"], json!("2025-09-11"));

        command.normalized_date = None;
        let value = serde_json::to_value(command.to_wire(true)).unwrap();
        assert!(value["parsed"].as_object().unwrap().contains_key("normalized_date"));
        assert!(value["parsed"]["normalized_date"].is_null());
    }
}
