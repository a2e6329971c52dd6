//! Concrete calendar scenarios.

use chrono::TimeDelta;
use pitiwork_recurrence::{
    CalendarEventRecord, ExpansionOptions, Occurrence, ParseErrorKind, RecurrencePattern,
    RecurrenceRule, Termination, WeekdayMask, decode, expand, expand_record,
};

use super::fixtures::*;

fn dates<P>(occurrences: &[Occurrence<P>]) -> Vec<chrono::NaiveDate> {
    occurrences.iter().map(|o| o.start.date()).collect()
}

// ============================================================================
// Pattern Scenarios
// ============================================================================

#[test_log::test]
fn daily_rule_bounded_by_end_date() {
    let rule = RecurrenceRule::new(
        RecurrencePattern::Daily,
        at(2024, 1, 1, 9, 0),
        Termination::EndDate {
            end: at(2024, 1, 5, 0, 0),
        },
    );
    let template = template("standup", at(2024, 1, 1, 9, 0), 15);

    let occurrences = expand(&rule, &template, &window(date(2024, 1, 1), date(2024, 1, 10)));

    assert_eq!(
        dates(&occurrences),
        (1..=5).map(|d| date(2024, 1, d)).collect::<Vec<_>>()
    );
    for occurrence in &occurrences {
        assert_eq!(occurrence.start.time(), at(2024, 1, 1, 9, 0).time());
        assert_eq!(occurrence.end - occurrence.start, TimeDelta::minutes(15));
    }
}

#[test_log::test]
fn weekly_rule_stops_after_occurrence_count() {
    let weekdays = WeekdayMask::from_bits(10).expect("Mon+Wed");
    let rule = RecurrenceRule::new(
        RecurrencePattern::Weekly { weekdays },
        at(2024, 1, 1, 10, 0),
        Termination::OccurrenceCount { count: 4 },
    );
    let template = template("gym", at(2024, 1, 1, 10, 0), 60);

    let occurrences = expand(&rule, &template, &window(date(2024, 1, 1), date(2024, 1, 31)));

    assert_eq!(
        dates(&occurrences),
        vec![date(2024, 1, 1), date(2024, 1, 3), date(2024, 1, 8), date(2024, 1, 10)]
    );
    let ids: Vec<_> = occurrences.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["gym-1", "gym-2", "gym-3", "gym-4"]);
}

#[test_log::test]
fn monthly_rule_skips_short_months_without_losing_count() {
    let rule = RecurrenceRule::new(
        RecurrencePattern::Monthly { day: 31 },
        at(2024, 1, 31, 8, 0),
        Termination::Unbounded,
    );
    let template = template("payroll", at(2024, 1, 31, 8, 0), 30);

    let february = expand(&rule, &template, &window(date(2024, 2, 1), date(2024, 2, 29)));
    assert!(february.is_empty());

    let march = expand(&rule, &template, &window(date(2024, 3, 1), date(2024, 3, 31)));
    assert_eq!(dates(&march), vec![date(2024, 3, 31)]);
    assert_eq!(march[0].id, "payroll-2");
}

#[test_log::test]
fn monthly_rule_steps_from_the_anchor_day() {
    let rule = RecurrenceRule::new(
        RecurrencePattern::Monthly { day: 15 },
        at(2024, 1, 5, 9, 0),
        Termination::Unbounded,
    );
    let template = template("rent", at(2024, 1, 5, 9, 0), 30);

    let occurrences = expand(&rule, &template, &window(date(2024, 1, 1), date(2024, 3, 31)));

    // Candidates are Jan 5, Feb 5 and Mar 5, none of which is the 15th.
    assert!(occurrences.is_empty());
}

#[test_log::test]
fn yearly_leap_day_rule_only_fires_in_leap_years() {
    let rule = RecurrenceRule::new(
        RecurrencePattern::Yearly { month: 2, day: 29 },
        at(2024, 2, 29, 0, 0),
        Termination::Unbounded,
    );
    let template = template("leap", at(2024, 2, 29, 0, 0), 24 * 60);

    let year_2025 = expand(&rule, &template, &window(date(2025, 1, 1), date(2025, 12, 31)));
    assert!(year_2025.is_empty());

    let year_2028 = expand(&rule, &template, &window(date(2028, 1, 1), date(2028, 12, 31)));
    assert_eq!(dates(&year_2028), vec![date(2028, 2, 29)]);
    assert_eq!(year_2028[0].id, "leap-2");
}

// ============================================================================
// Descriptor Fallback Scenarios
// ============================================================================

#[test]
fn descriptor_without_start_is_a_parse_failure() {
    let err = decode(r#"<RecurrenceInfo Type="0" Range="1" End="01/05/2024 00:00:00" />"#)
        .expect_err("Start is required");

    assert_eq!(err.kind, ParseErrorKind::MissingAttribute);
}

#[test]
fn absent_descriptor_is_not_a_recurrence() {
    assert_eq!(decode("").expect("empty descriptor decodes"), None);
}

#[test_log::test]
fn non_recurring_record_yields_itself() {
    let record: CalendarEventRecord = serde_json::from_value(serde_json::json!({
        "Oid": "dentist",
        "Subject": "Dentist",
        "StartOn": "2024-05-10T14:00:00",
        "EndOn": "2024-05-10T15:00:00",
        "RecurrenceInfoXml": null
    }))
    .expect("valid record");

    let occurrences = expand_record(
        &record,
        &window(date(2024, 5, 1), date(2024, 5, 31)),
        &ExpansionOptions::default(),
    )
    .expect("valid record");

    assert_eq!(occurrences.len(), 1);
    assert_eq!(occurrences[0].id, "dentist");
    assert_eq!(occurrences[0].start, record.start_on);
    assert_eq!(occurrences[0].end, record.end_on);
}
