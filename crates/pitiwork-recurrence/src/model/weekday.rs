use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

const ALL_BITS: u8 = 0b0111_1111;

/// Days of the week in bit `i` = weekday `i` order, Sunday = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekdayMask(u8);

impl WeekdayMask {
    pub const EMPTY: Self = Self(0);

    /// Builds a mask from its wire value, rejecting bits above Saturday.
    #[must_use]
    pub fn from_bits(bits: u32) -> Option<Self> {
        u8::try_from(bits)
            .ok()
            .filter(|b| b & !ALL_BITS == 0)
            .map(Self)
    }

    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn contains(self, weekday: Weekday) -> bool {
        self.0 & bit(weekday) != 0
    }

    #[must_use]
    pub fn matches(self, date: NaiveDate) -> bool {
        self.contains(date.weekday())
    }
}

const fn bit(weekday: Weekday) -> u8 {
    1 << weekday.num_days_from_sunday()
}
