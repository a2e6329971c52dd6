use chrono::{Months, NaiveDate};

use crate::error::{RecurrenceError, RecurrenceResult};

/// Inclusive, day-granular range of dates a caller wants occurrences for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl QueryWindow {
    /// ## Errors
    /// Returns `InvalidWindow` if `end` is before `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> RecurrenceResult<Self> {
        if end < start {
            return Err(RecurrenceError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// The window end pushed `years` into the future, saturating at the calendar limit.
    #[must_use]
    pub fn horizon(&self, years: u32) -> NaiveDate {
        self.end
            .checked_add_months(Months::new(years.saturating_mul(12)))
            .unwrap_or(NaiveDate::MAX)
    }
}
