//! Descriptor encoding.

use chrono::{NaiveDate, NaiveDateTime};
use pitiwork_core::constants::{DESCRIPTOR_DATETIME_FORMAT, DESCRIPTOR_ROOT, DESCRIPTOR_VERSION};
use quick_xml::Writer;
use quick_xml::events::{BytesStart, Event};

use crate::error::{RecurrenceError, RecurrenceResult};
use crate::expand::{ExpansionOptions, PatternWalk};
use crate::model::{RecurrencePattern, RecurrenceRule, Termination};

/// Problems found while encoding that did not stop the descriptor from being written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeWarning {
    /// The count carried by the rule differs from the count the pattern produces.
    OccurrenceCountMismatch { declared: u32, computed: u32 },
    /// The iteration cap was reached before the termination boundary, so the
    /// walked count and end are lower bounds.
    CountTruncated { limit: usize },
}

/// An encoded descriptor together with what was recomputed to produce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedDescriptor {
    pub descriptor: String,
    /// Written `OccurrenceCount`; `None` for unbounded rules.
    pub occurrence_count: Option<u32>,
    pub end: Option<NaiveDateTime>,
    pub warnings: Vec<EncodeWarning>,
}

/// ## Summary
/// Encodes `rule` anchored at `template_start` into a descriptor string.
///
/// ## Errors
/// Returns an error if the rule is invalid or the XML cannot be written.
pub fn encode(rule: &RecurrenceRule, template_start: NaiveDateTime) -> RecurrenceResult<String> {
    encode_with_report(rule, template_start, &ExpansionOptions::default())
        .map(|encoded| encoded.descriptor)
}

/// ## Summary
/// Encodes `rule` anchored at `template_start`, recomputing `OccurrenceCount`
/// by walking the pattern up to its termination boundary.
///
/// For an end-date rule the walked count is written, and a count carried by the
/// rule that disagrees with it is reported and replaced. For a count-limited
/// rule the count is the boundary itself and is always kept; the walk only
/// places `End` on the last occurrence. A walk cut short by the iteration cap is
/// reported and leaves `End` as the rule had it. A rule without an `Id`
/// receives a new one.
///
/// ## Errors
/// Returns an error if the rule is invalid or the XML cannot be written.
#[tracing::instrument(skip(rule, options), fields(pattern = ?rule.pattern))]
pub fn encode_with_report(
    rule: &RecurrenceRule,
    template_start: NaiveDateTime,
    options: &ExpansionOptions,
) -> RecurrenceResult<EncodedDescriptor> {
    rule.validate()?;

    let mut warnings = Vec::new();
    let anchor = template_start.date();

    let (occurrence_count, end) = match rule.termination {
        Termination::EndDate { end } => {
            let summary = count_occurrences(rule, anchor, end.date(), None, options, &mut warnings);
            check_declared_count(rule, summary.count, &mut warnings);
            (Some(summary.count), Some(end))
        }
        Termination::OccurrenceCount { count } => {
            let summary =
                count_occurrences(rule, anchor, NaiveDate::MAX, Some(count), options, &mut warnings);
            check_declared_count(rule, count, &mut warnings);
            let end = summary
                .last
                .filter(|_| !summary.truncated)
                .map(|date| date.and_time(template_start.time()))
                .or(rule.anchor_end);
            (Some(count), end)
        }
        Termination::Unbounded => (None, rule.anchor_end),
    };

    let descriptor = write_descriptor(rule, template_start, end, occurrence_count)?;

    Ok(EncodedDescriptor {
        descriptor,
        occurrence_count,
        end,
        warnings,
    })
}

struct CountSummary {
    count: u32,
    last: Option<NaiveDate>,
    truncated: bool,
}

fn count_occurrences(
    rule: &RecurrenceRule,
    anchor: NaiveDate,
    until: NaiveDate,
    max_matches: Option<u32>,
    options: &ExpansionOptions,
    warnings: &mut Vec<EncodeWarning>,
) -> CountSummary {
    let mut walk = PatternWalk::new(rule.pattern, anchor, until, options.max_iterations)
        .with_max_matches(max_matches);
    let last = walk.by_ref().last();

    if walk.truncated() {
        tracing::warn!(
            limit = options.max_iterations,
            walked = walk.matches(),
            "Occurrence walk stopped at the iteration limit"
        );
        warnings.push(EncodeWarning::CountTruncated {
            limit: options.max_iterations,
        });
    }

    CountSummary {
        count: walk.matches(),
        last: last.map(|m| m.date),
        truncated: walk.truncated(),
    }
}

fn check_declared_count(rule: &RecurrenceRule, count: u32, warnings: &mut Vec<EncodeWarning>) {
    if let Some(declared) = rule.declared_count.filter(|d| *d != count) {
        tracing::warn!(
            declared,
            computed = count,
            "Declared occurrence count disagrees with the rule, using computed count"
        );
        warnings.push(EncodeWarning::OccurrenceCountMismatch {
            declared,
            computed: count,
        });
    }
}

fn write_descriptor(
    rule: &RecurrenceRule,
    start: NaiveDateTime,
    end: Option<NaiveDateTime>,
    occurrence_count: Option<u32>,
) -> RecurrenceResult<String> {
    let start = start.format(DESCRIPTOR_DATETIME_FORMAT).to_string();
    let end = end.map(|end| end.format(DESCRIPTOR_DATETIME_FORMAT).to_string());
    let id = rule
        .id
        .clone()
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let type_code = rule.pattern.type_code().to_string();
    let occurrence_count = occurrence_count.map(|count| count.to_string());
    let range = rule.termination.range_code().to_string();

    let mut elem = BytesStart::new(DESCRIPTOR_ROOT);
    elem.push_attribute(("Start", start.as_str()));
    if let Some(end) = &end {
        elem.push_attribute(("End", end.as_str()));
    }
    elem.push_attribute(("Id", id.as_str()));
    elem.push_attribute(("Type", type_code.as_str()));
    if let Some(count) = &occurrence_count {
        elem.push_attribute(("OccurrenceCount", count.as_str()));
    }
    elem.push_attribute(("Range", range.as_str()));

    match rule.pattern {
        RecurrencePattern::Daily => {}
        RecurrencePattern::Weekly { weekdays } => {
            elem.push_attribute(("WeekDays", weekdays.bits().to_string().as_str()));
        }
        RecurrencePattern::Monthly { day } => {
            elem.push_attribute(("DayNumber", day.to_string().as_str()));
        }
        RecurrencePattern::Yearly { month, day } => {
            elem.push_attribute(("Month", month.to_string().as_str()));
            elem.push_attribute(("DayNumber", day.to_string().as_str()));
        }
    }

    for (key, value) in &rule.extra_attributes {
        elem.push_attribute((key.as_str(), value.as_str()));
    }
    elem.push_attribute(("Version", rule.version.as_deref().unwrap_or(DESCRIPTOR_VERSION)));

    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Empty(elem))?;

    String::from_utf8(writer.into_inner()).map_err(|e| {
        tracing::error!("Generated invalid UTF-8 in descriptor: {}", e);
        RecurrenceError::WriteError(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "Invalid UTF-8 in descriptor output",
        ))
    })
}
