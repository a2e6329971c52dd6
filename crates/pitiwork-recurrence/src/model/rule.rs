use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::WeekdayMask;
use crate::error::{RecurrenceError, RecurrenceResult};

/// How often a recurring event repeats, with the parameters each kind needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RecurrencePattern {
    Daily,
    Weekly { weekdays: WeekdayMask },
    Monthly { day: u32 },
    Yearly { month: u32, day: u32 },
}

impl RecurrencePattern {
    /// Numeric `Type` used by the descriptor format.
    #[must_use]
    pub const fn type_code(self) -> u8 {
        match self {
            Self::Daily => 0,
            Self::Weekly { .. } => 1,
            Self::Monthly { .. } => 2,
            Self::Yearly { .. } => 3,
        }
    }

    /// Whether `date` is an occurrence date of this pattern.
    #[must_use]
    pub fn matches(self, date: NaiveDate) -> bool {
        match self {
            Self::Daily => true,
            Self::Weekly { weekdays } => weekdays.matches(date),
            Self::Monthly { day } => date.day() == day,
            Self::Yearly { month, day } => date.month() == month && date.day() == day,
        }
    }

    /// ## Summary
    /// Checks the per-type parameter ranges.
    ///
    /// An empty weekday mask passes: it never matches, which expands to nothing.
    ///
    /// ## Errors
    /// Returns `InvalidRule` if a day of month is outside 1-31 or a month outside 1-12.
    pub fn validate(self) -> RecurrenceResult<()> {
        let day = match self {
            Self::Daily | Self::Weekly { .. } => return Ok(()),
            Self::Monthly { day } => day,
            Self::Yearly { month, day } => {
                if !(1..=12).contains(&month) {
                    return Err(RecurrenceError::InvalidRule(format!(
                        "month {month} is outside 1-12"
                    )));
                }
                day
            }
        };

        if (1..=31).contains(&day) {
            Ok(())
        } else {
            Err(RecurrenceError::InvalidRule(format!(
                "day of month {day} is outside 1-31"
            )))
        }
    }
}

/// When a pattern stops producing occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum Termination {
    /// Stop after this date, inclusive by day.
    EndDate { end: NaiveDateTime },
    /// Stop after this many occurrences, counted from the anchor.
    OccurrenceCount { count: u32 },
    Unbounded,
}

impl Termination {
    /// Numeric `Range` used by the descriptor format.
    #[must_use]
    pub const fn range_code(self) -> u8 {
        match self {
            Self::Unbounded => 0,
            Self::EndDate { .. } => 1,
            Self::OccurrenceCount { .. } => 2,
        }
    }
}

/// A decoded recurrence descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRule {
    /// Opaque descriptor identifier, kept verbatim.
    pub id: Option<String>,
    pub pattern: RecurrencePattern,
    /// First candidate date; its time of day is the time of every occurrence.
    pub anchor_start: NaiveDateTime,
    pub anchor_end: Option<NaiveDateTime>,
    pub termination: Termination,
    /// `OccurrenceCount` as written by the producer of the descriptor.
    pub declared_count: Option<u32>,
    pub version: Option<String>,
    /// Attributes this version does not interpret, in document order.
    pub extra_attributes: Vec<(String, String)>,
}

impl RecurrenceRule {
    #[must_use]
    pub fn new(
        pattern: RecurrencePattern,
        anchor_start: NaiveDateTime,
        termination: Termination,
    ) -> Self {
        let anchor_end = match termination {
            Termination::EndDate { end } => Some(end),
            Termination::OccurrenceCount { .. } | Termination::Unbounded => None,
        };
        let declared_count = match termination {
            Termination::OccurrenceCount { count } => Some(count),
            Termination::EndDate { .. } | Termination::Unbounded => None,
        };

        Self {
            id: None,
            pattern,
            anchor_start,
            anchor_end,
            termination,
            declared_count,
            version: None,
            extra_attributes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_declared_count(mut self, count: u32) -> Self {
        self.declared_count = Some(count);
        self
    }

    #[must_use]
    pub fn anchor_date(&self) -> NaiveDate {
        self.anchor_start.date()
    }

    /// ## Summary
    /// Validates the pattern parameters and the termination boundary.
    ///
    /// ## Errors
    /// Returns `InvalidRule` if the pattern parameters are out of range or an
    /// end date precedes the anchor date.
    pub fn validate(&self) -> RecurrenceResult<()> {
        self.pattern.validate()?;

        match self.termination {
            Termination::EndDate { end } if end.date() < self.anchor_date() => {
                Err(RecurrenceError::InvalidRule(format!(
                    "end date {} precedes anchor {}",
                    end.date(),
                    self.anchor_date()
                )))
            }
            _ => Ok(()),
        }
    }
}
