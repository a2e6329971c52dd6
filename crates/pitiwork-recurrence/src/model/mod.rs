//! Structured forms of recurrence rules, event templates and occurrences.

mod event;
mod rule;
mod weekday;
mod window;

pub use event::{EventTemplate, Occurrence};
pub use rule::{RecurrencePattern, RecurrenceRule, Termination};
pub use weekday::WeekdayMask;
pub use window::QueryWindow;
