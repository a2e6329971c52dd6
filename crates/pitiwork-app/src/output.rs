//! JSON views printed by the command-line surface.

use chrono::NaiveDateTime;
use pitiwork_core::types::{label_color, label_text, status_color, status_text};
use pitiwork_recurrence::{CalendarEventRecord, Occurrence};
use serde::Serialize;

/// Display metadata for a label or status value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayTag {
    pub value: i32,
    pub text: &'static str,
    pub color: &'static str,
}

impl DisplayTag {
    #[must_use]
    pub fn label(value: i32) -> Self {
        Self {
            value,
            text: label_text(value),
            color: label_color(value),
        }
    }

    #[must_use]
    pub fn status(value: i32) -> Self {
        Self {
            value,
            text: status_text(value),
            color: status_color(value),
        }
    }
}

/// One rendered occurrence, as a calendar view consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OccurrenceView {
    pub id: String,
    pub template_id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub all_day: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub label: DisplayTag,
    pub status: DisplayTag,
}

impl From<&Occurrence<CalendarEventRecord>> for OccurrenceView {
    fn from(occurrence: &Occurrence<CalendarEventRecord>) -> Self {
        let record = &occurrence.source.payload;
        Self {
            id: occurrence.id.clone(),
            template_id: occurrence.source.id.clone(),
            title: occurrence.subject().to_owned(),
            start: occurrence.start,
            end: occurrence.end,
            all_day: occurrence.all_day(),
            location: record.location.clone(),
            label: DisplayTag::label(record.label),
            status: DisplayTag::status(record.status),
        }
    }
}
