//! Shared fixtures for integration tests.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use pitiwork_recurrence::{
    EventTemplate, QueryWindow, RecurrencePattern, RecurrenceRule, Termination, WeekdayMask,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, min, 0).expect("valid time")
}

pub fn window(start: NaiveDate, end: NaiveDate) -> QueryWindow {
    QueryWindow::new(start, end).expect("valid window")
}

/// A template starting at `start` and lasting `minutes`.
pub fn template(id: &str, start: NaiveDateTime, minutes: i64) -> Arc<EventTemplate> {
    let end = start + chrono::TimeDelta::minutes(minutes);
    Arc::new(EventTemplate::new(id, "Fixture", start, end, ()).expect("valid template"))
}

/// A spread of rules covering every pattern and termination mode, each anchored
/// on a date its pattern matches.
pub fn sample_rules() -> Vec<(RecurrenceRule, Arc<EventTemplate>)> {
    let weekdays = WeekdayMask::from_bits(0b0011_0101).expect("valid mask");

    [
        (RecurrencePattern::Daily, at(2024, 1, 31, 9, 30), Termination::Unbounded),
        (
            RecurrencePattern::Daily,
            at(2024, 1, 31, 9, 30),
            Termination::EndDate {
                end: at(2024, 3, 15, 0, 0),
            },
        ),
        (
            RecurrencePattern::Weekly { weekdays },
            at(2024, 1, 31, 9, 30),
            Termination::OccurrenceCount { count: 40 },
        ),
        (
            RecurrencePattern::Monthly { day: 31 },
            at(2024, 1, 31, 9, 30),
            Termination::Unbounded,
        ),
        (
            RecurrencePattern::Monthly { day: 15 },
            at(2024, 1, 15, 14, 0),
            Termination::OccurrenceCount { count: 6 },
        ),
        (
            RecurrencePattern::Yearly { month: 2, day: 29 },
            at(2024, 2, 29, 8, 0),
            Termination::Unbounded,
        ),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (pattern, anchor, termination))| {
        let rule = RecurrenceRule::new(pattern, anchor, termination);
        (rule, template(&format!("rule{i}"), anchor, 45))
    })
    .collect()
}
