//! Raw calendar records as served by the event store, and their expansion.
//!
//! A record carries its recurrence descriptor as an opaque string. Records
//! whose descriptor is absent or corrupt are rendered as single events so that
//! one bad record never hides the rest of a calendar.

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::descriptor::decode;
use crate::error::RecurrenceResult;
use crate::expand::{ExpansionOptions, Expander};
use crate::model::{EventTemplate, Occurrence, QueryWindow};

/// One stored calendar event, with field names as the event store serves them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CalendarEventRecord {
    pub oid: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "record_time")]
    pub start_on: NaiveDateTime,
    #[serde(with = "record_time")]
    pub end_on: NaiveDateTime,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub label: i32,
    #[serde(default)]
    pub status: i32,
    #[serde(default, rename = "Type")]
    pub event_type: i32,
    #[serde(default)]
    pub recurrence_info_xml: Option<String>,
    /// Fields not interpreted here, passed through as-is.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CalendarEventRecord {
    /// The recurrence descriptor, if the record has a non-blank one.
    #[must_use]
    pub fn descriptor(&self) -> Option<&str> {
        self.recurrence_info_xml
            .as_deref()
            .filter(|xml| !xml.trim().is_empty())
    }

    /// ## Summary
    /// Builds the template used to place this record's occurrences.
    ///
    /// ## Errors
    /// Returns `InvalidTemplate` if the record ends before it starts.
    pub fn template(&self) -> RecurrenceResult<EventTemplate<Self>> {
        Ok(EventTemplate::new(
            self.oid.clone(),
            self.subject.clone(),
            self.start_on,
            self.end_on,
            self.clone(),
        )?
        .with_all_day(self.all_day))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordFeed {
    Envelope { value: Vec<CalendarEventRecord> },
    List(Vec<CalendarEventRecord>),
}

/// ## Summary
/// Parses records from either an OData envelope (`{"value": [...]}`) or a bare
/// JSON array.
///
/// ## Errors
/// Returns an error if the JSON matches neither shape.
pub fn parse_records(json: &str) -> RecurrenceResult<Vec<CalendarEventRecord>> {
    let records = match serde_json::from_str::<RecordFeed>(json)? {
        RecordFeed::Envelope { value } | RecordFeed::List(value) => value,
    };
    tracing::debug!(count = records.len(), "Parsed calendar records");
    Ok(records)
}

/// ## Summary
/// Occurrences of one record inside `window`.
///
/// A record without a descriptor, or with one that fails to decode, yields the
/// record itself when it starts inside the window.
///
/// ## Errors
/// Returns `InvalidTemplate` if the record ends before it starts.
#[tracing::instrument(skip_all, fields(record_id = %record.oid))]
pub fn expand_record(
    record: &CalendarEventRecord,
    window: &QueryWindow,
    options: &ExpansionOptions,
) -> RecurrenceResult<Vec<Occurrence<CalendarEventRecord>>> {
    let template = Arc::new(record.template()?);

    let rule = match record.descriptor().map(decode) {
        Some(Ok(rule)) => rule,
        Some(Err(e)) => {
            tracing::warn!(error = %e, "Unreadable recurrence descriptor, rendering as a single event");
            None
        }
        None => None,
    };

    let occurrences = match rule {
        Some(rule) => Expander::new(&rule)
            .with_options(*options)
            .expand(&template, window),
        None if window.contains(template.start_on().date()) => vec![Occurrence::single(&template)],
        None => Vec::new(),
    };

    Ok(occurrences)
}

/// ## Summary
/// Occurrences of all records inside `window`, ordered by start.
///
/// Records that cannot be turned into a template are logged and skipped.
#[must_use]
#[tracing::instrument(skip_all, fields(records = records.len()))]
pub fn expand_records(
    records: &[CalendarEventRecord],
    window: &QueryWindow,
    options: &ExpansionOptions,
) -> Vec<Occurrence<CalendarEventRecord>> {
    let mut occurrences: Vec<_> = records
        .iter()
        .filter_map(|record| match expand_record(record, window, options) {
            Ok(occurrences) => Some(occurrences),
            Err(e) => {
                tracing::warn!(record_id = %record.oid, error = %e, "Skipping calendar record");
                None
            }
        })
        .flatten()
        .collect();

    occurrences.sort_by_key(|occurrence| occurrence.start);
    occurrences
}

/// Timestamps as the event store writes them: RFC 3339 with an offset, whose
/// wall-clock part is kept, or a naive ISO 8601 date-time.
mod record_time {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer};

    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];
    const OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn parse(value: &str) -> Option<NaiveDateTime> {
        DateTime::parse_from_rfc3339(value)
            .map(|dt| dt.naive_local())
            .ok()
            .or_else(|| {
                NAIVE_FORMATS
                    .iter()
                    .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
            })
    }

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(OUTPUT_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let value = String::deserialize(deserializer)?;
        parse(&value).ok_or_else(|| {
            serde::de::Error::custom(format!("unrecognised timestamp '{value}'"))
        })
    }
}
