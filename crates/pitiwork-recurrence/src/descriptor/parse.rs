//! Descriptor decoding.

use chrono::{Datelike, NaiveDateTime};
use pitiwork_core::constants::{DESCRIPTOR_DATETIME_FORMAT, DESCRIPTOR_ROOT};
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};

use super::error::{ParseError, ParseResult};
use crate::model::{RecurrencePattern, RecurrenceRule, Termination, WeekdayMask};

/// Decodes a `RecurrenceInfo` descriptor.
///
/// ## Summary
/// Returns `Ok(None)` for an absent (empty or blank) descriptor, which means the
/// event does not recur. Attributes this version does not know are kept on the
/// rule untouched.
///
/// ## Errors
/// Returns an error if the XML is malformed, the `RecurrenceInfo` element is
/// missing, `Start` is missing or unparsable, or a numeric attribute is out of
/// range.
#[tracing::instrument(skip(descriptor), fields(descriptor_len = descriptor.len()))]
pub fn decode(descriptor: &str) -> ParseResult<Option<RecurrenceRule>> {
    if descriptor.trim().is_empty() {
        tracing::trace!("Empty descriptor, event does not recur");
        return Ok(None);
    }

    let attributes = read_root_attributes(descriptor)?;
    let rule = build_rule(AttributeBag::new(attributes))?;

    tracing::debug!(pattern = ?rule.pattern, termination = ?rule.termination, "Decoded descriptor");
    Ok(Some(rule))
}

/// Attributes of the first `RecurrenceInfo` element, in document order.
fn read_root_attributes(descriptor: &str) -> ParseResult<Vec<(String, String)>> {
    let mut reader = Reader::from_reader(descriptor.as_bytes());
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e) | Event::Empty(ref e))
                if e.local_name().as_ref() == DESCRIPTOR_ROOT.as_bytes() =>
            {
                return collect_attributes(e);
            }
            Ok(Event::Eof) => return Err(ParseError::missing_element(DESCRIPTOR_ROOT)),
            Err(e) => return Err(ParseError::xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }
}

fn collect_attributes(element: &BytesStart<'_>) -> ParseResult<Vec<(String, String)>> {
    element
        .attributes()
        .map(|attr| {
            let attr = attr?;
            let key = std::str::from_utf8(attr.key.as_ref())?.to_owned();
            let raw = std::str::from_utf8(&attr.value)?;
            Ok((key, unescape(raw)?.into_owned()))
        })
        .collect()
}

/// Attribute list that hands out recognised attributes and keeps the rest.
struct AttributeBag {
    entries: Vec<(String, String)>,
}

impl AttributeBag {
    fn new(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }

    /// Removes `name` and returns its value; blank values count as absent.
    fn take(&mut self, name: &str) -> Option<String> {
        let pos = self.entries.iter().position(|(key, _)| key == name)?;
        let (_, value) = self.entries.remove(pos);
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_owned())
    }

    fn take_datetime(&mut self, name: &str) -> ParseResult<Option<NaiveDateTime>> {
        self.take(name)
            .map(|value| {
                NaiveDateTime::parse_from_str(&value, DESCRIPTOR_DATETIME_FORMAT).map_err(|_err| {
                    ParseError::invalid_value(format!(
                        "{name}: expected MM/DD/YYYY HH:mm:ss, got '{value}'"
                    ))
                })
            })
            .transpose()
    }

    fn take_number(&mut self, name: &str) -> ParseResult<Option<u32>> {
        self.take(name)
            .map(|value| {
                value.parse::<u32>().map_err(|_err| {
                    ParseError::invalid_value(format!(
                        "{name}: expected a non-negative integer, got '{value}'"
                    ))
                })
            })
            .transpose()
    }

    fn into_remaining(self) -> Vec<(String, String)> {
        self.entries
    }
}

fn build_rule(mut attrs: AttributeBag) -> ParseResult<RecurrenceRule> {
    let anchor_start = attrs
        .take_datetime("Start")?
        .ok_or_else(|| ParseError::missing_attribute("Start"))?;
    let anchor_end = attrs.take_datetime("End")?;
    let id = attrs.take("Id");
    let type_code = attrs.take_number("Type")?.unwrap_or(0);
    let declared_count = attrs.take_number("OccurrenceCount")?;
    let range = attrs.take_number("Range")?.unwrap_or(0);
    let weekdays = attrs.take_number("WeekDays")?;
    let month = attrs.take_number("Month")?;
    let day_number = attrs.take_number("DayNumber")?;
    let version = attrs.take("Version");

    let pattern = match type_code {
        0 => RecurrencePattern::Daily,
        1 => {
            let weekdays = match weekdays {
                Some(bits) => WeekdayMask::from_bits(bits).ok_or_else(|| {
                    ParseError::invalid_value(format!("WeekDays: {bits} is not a weekday mask"))
                })?,
                None => WeekdayMask::EMPTY,
            };
            if weekdays.is_empty() {
                tracing::debug!("Weekly descriptor without weekdays never matches");
            }
            RecurrencePattern::Weekly { weekdays }
        }
        2 => RecurrencePattern::Monthly {
            day: day_number.unwrap_or_else(|| anchor_start.day()),
        },
        3 => RecurrencePattern::Yearly {
            month: month.unwrap_or_else(|| anchor_start.month()),
            day: day_number.unwrap_or_else(|| anchor_start.day()),
        },
        other => {
            return Err(ParseError::unsupported_value(format!(
                "Type {other} is not a supported recurrence type"
            )));
        }
    };

    pattern
        .validate()
        .map_err(|err| ParseError::invalid_value(err.to_string()))?;

    let termination = match (range, anchor_end, declared_count) {
        (1, Some(end), _) => Termination::EndDate { end },
        (2, _, Some(count)) => Termination::OccurrenceCount { count },
        _ => Termination::Unbounded,
    };

    Ok(RecurrenceRule {
        id,
        pattern,
        anchor_start,
        anchor_end,
        termination,
        declared_count,
        version,
        extra_attributes: attrs.into_remaining(),
    })
}
