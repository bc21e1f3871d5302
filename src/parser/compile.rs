//! Compilation of interpreted commands into booking templates
//!
//! A [`BookingCommand`] is mapped onto a versioned template with flat
//! arguments a booking backend can execute. Booking requests that lack the
//! room, the date or a usable time range carry warnings instead of failing.

use crate::command::{BookingCommand, Intent};
use log::debug;
use serde::Serialize;

/// Backend template selected by intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Template {
    #[serde(rename = "book_v1")]
    BookV1,
    #[serde(rename = "cancel_v1")]
    CancelV1,
    #[serde(rename = "modify_v1")]
    ModifyV1,
    #[serde(rename = "check_v1")]
    CheckV1,
    #[serde(rename = "noop")]
    Noop,
}

impl From<Intent> for Template {
    fn from(intent: Intent) -> Self {
        match intent {
            Intent::Book => Template::BookV1,
            Intent::Cancel => Template::CancelV1,
            Intent::Modify => Template::ModifyV1,
            Intent::CheckAvailability => Template::CheckV1,
            Intent::Greet | Intent::Fallback => Template::Noop,
        }
    }
}

/// Problems found while compiling a booking request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompileWarning {
    MissingRoomId,
    MissingDate,
    MissingTimeRange,
    /// Start is not before end
    InvalidTimeRange,
}

/// Template arguments
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateArgs {
    /// Lower-cased room with spaces replaced by dashes, e.g. `sjt-315`
    pub room_id: Option<String>,
    pub date: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub purpose: Option<String>,
    pub equip: Vec<String>,
    pub capacity: Option<u32>,
    pub recurrence: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledCommand {
    pub template: Template,
    pub args: TemplateArgs,
    pub warnings: Vec<CompileWarning>,
}

/// Slug a room identifier for use as a backend key
pub fn room_slug(room: &str) -> String {
    room.trim().to_lowercase().replace(' ', "-")
}

impl BookingCommand {
    /// Compile into a template call
    pub fn compile(&self) -> CompiledCommand {
        let template = Template::from(self.intent);
        let args = TemplateArgs {
            room_id: self.room.as_deref().map(room_slug),
            date: self.normalized_date.clone(),
            start: self.start.clone(),
            end: self.end.clone(),
            purpose: None,
            equip: Vec::new(),
            capacity: None,
            recurrence: None,
        };

        let mut warnings = Vec::new();
        if template == Template::BookV1 {
            if args.room_id.is_none() {
                warnings.push(CompileWarning::MissingRoomId);
            }
            if args.date.is_none() {
                warnings.push(CompileWarning::MissingDate);
            }
            match (&args.start, &args.end) {
                // HH:MM strings order the same way as the times they name
                (Some(start), Some(end)) if start >= end => {
                    warnings.push(CompileWarning::InvalidTimeRange)
                }
                (Some(_), Some(_)) => {}
                _ => warnings.push(CompileWarning::MissingTimeRange),
            }
        }

        debug!("Compiled intent '{}' with {} warning(s)", self.intent, warnings.len());
        CompiledCommand {
            template,
            args,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::INTERPRETATION_TZ;
    use crate::parser::interpret_at;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_case::test_case;

    fn compile(text: &str) -> CompiledCommand {
        let now = INTERPRETATION_TZ.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap();
        interpret_at(text, now).compile()
    }

    #[test]
    fn test_complete_booking_compiles_cleanly() {
        let compiled = compile("Reserve SJT 315 11 Sept 14:00 to 16:00");
        assert_eq!(
            serde_json::to_value(&compiled).unwrap(),
            json!({
                "template": "book_v1",
                "args": {
                    "room_id": "sjt-315",
                    "date": "2025-09-11",
                    "start": "14:00",
                    "end": "16:00",
                    "purpose": null,
                    "equip": [],
                    "capacity": null,
                    "recurrence": null
                },
                "warnings": []
            })
        );
    }

    #[test_case("cancel tt 101", Template::CancelV1)]
    #[test_case("change tt 101", Template::ModifyV1)]
    #[test_case("is tt 101 free", Template::CheckV1)]
    #[test_case("hello", Template::Noop)]
    #[test_case("what now", Template::Noop)]
    fn test_template_follows_intent(text: &str, expected: Template) {
        let compiled = compile(text);
        assert_eq!(compiled.template, expected);
        assert!(compiled.warnings.is_empty());
    }

    #[test]
    fn test_bare_booking_warns_about_everything_missing() {
        assert_eq!(
            compile("book please").warnings,
            vec![
                CompileWarning::MissingRoomId,
                CompileWarning::MissingDate,
                CompileWarning::MissingTimeRange,
            ]
        );
    }

    #[test]
    fn test_missing_date_only() {
        assert_eq!(compile("book sjt315 2pm to 4pm").warnings, vec![CompileWarning::MissingDate]);
    }

    #[test_case("book sjt 315 on 11 sept 4pm to 2pm")]
    #[test_case("book sjt 315 on 11 sept 14:00 to 14:00")]
    fn test_inverted_range_is_invalid(text: &str) {
        assert_eq!(compile(text).warnings, vec![CompileWarning::InvalidTimeRange]);
    }

    #[test]
    fn test_room_slug() {
        assert_eq!(room_slug("SJT 315"), "sjt-315");
        assert_eq!(room_slug("SJT315"), "sjt315");
        assert_eq!(serde_json::to_value(CompileWarning::MissingRoomId).unwrap(), json!("missing_room_id"));
    }
}
