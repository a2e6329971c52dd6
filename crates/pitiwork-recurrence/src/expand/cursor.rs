//! Candidate-date stepping for each recurrence pattern.

use chrono::{Days, Months, NaiveDate};

use crate::model::RecurrencePattern;

/// Position of the stepping cursor in a pattern's sequence of candidate dates.
///
/// The anchor is the first candidate. Later ones are derived from the anchor and
/// the step index rather than from the previous candidate, so a clamped short
/// month never shifts later ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    anchor: NaiveDate,
    step: u32,
    date: NaiveDate,
}

/// Outcome of evaluating one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub matched: bool,
    /// `None` once the next candidate would leave the representable calendar.
    pub next: Option<Cursor>,
}

impl Cursor {
    /// First candidate of `pattern` for a pattern anchored on `anchor`.
    #[must_use]
    pub fn start(pattern: RecurrencePattern, anchor: NaiveDate) -> Option<Self> {
        Self::at(pattern, anchor, 0)
    }

    fn at(pattern: RecurrencePattern, anchor: NaiveDate, step: u32) -> Option<Self> {
        candidate(pattern, anchor, step).map(|date| Self { anchor, step, date })
    }

    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub fn advance(self, pattern: RecurrencePattern) -> Option<Self> {
        Self::at(pattern, self.anchor, self.step.checked_add(1)?)
    }

    /// Evaluates the current candidate and moves to the next one.
    #[must_use]
    pub fn step(self, pattern: RecurrencePattern) -> Step {
        Step {
            matched: pattern.matches(self.date),
            next: self.advance(pattern),
        }
    }
}

fn candidate(pattern: RecurrencePattern, anchor: NaiveDate, step: u32) -> Option<NaiveDate> {
    match pattern {
        RecurrencePattern::Daily | RecurrencePattern::Weekly { .. } => {
            anchor.checked_add_days(Days::new(u64::from(step)))
        }
        // Month arithmetic clamps to the last day of shorter months.
        RecurrencePattern::Monthly { .. } => anchor.checked_add_months(Months::new(step)),
        RecurrencePattern::Yearly { .. } => {
            anchor.checked_add_months(Months::new(step.checked_mul(12)?))
        }
    }
}
