//! Descriptor encode/decode agreement.

use pitiwork_recurrence::{
    EncodeWarning, ExpansionOptions, RecurrencePattern, RecurrenceRule, Termination, decode,
    encode, encode_with_report,
};

use super::fixtures::*;

#[test]
fn decoding_an_encoded_rule_preserves_it() {
    for (rule, template) in sample_rules() {
        let xml = encode(&rule, template.start_on()).expect("valid rule encodes");
        let decoded = decode(&xml)
            .expect("encoded descriptor decodes")
            .expect("descriptor present");

        assert_eq!(decoded.pattern, rule.pattern);
        assert_eq!(decoded.termination, rule.termination);
        assert_eq!(decoded.anchor_start, template.start_on());
        assert!(decoded.id.is_some(), "encode assigns an id");
    }
}

#[test]
fn reencoding_keeps_the_descriptor_stable() {
    let xml = r#"<RecurrenceInfo Start="03/04/2024 07:15:00" End="03/29/2024 07:15:00" Id="a1b2" Type="1" OccurrenceCount="8" Range="2" WeekDays="34" Version="2"/>"#;
    let rule = decode(xml).expect("valid").expect("present");

    let encoded = encode(&rule, rule.anchor_start).expect("valid rule encodes");

    assert_eq!(encoded, xml);
}

#[test_log::test]
fn caller_supplied_count_is_recomputed() {
    let rule = RecurrenceRule::new(
        RecurrencePattern::Daily,
        at(2024, 6, 1, 12, 0),
        Termination::EndDate {
            end: at(2024, 6, 10, 0, 0),
        },
    )
    .with_declared_count(3);

    let report = encode_with_report(&rule, rule.anchor_start, &ExpansionOptions::default())
        .expect("valid rule encodes");

    assert_eq!(report.occurrence_count, Some(10));
    assert_eq!(
        report.warnings,
        vec![EncodeWarning::OccurrenceCountMismatch {
            declared: 3,
            computed: 10
        }]
    );
    assert!(report.descriptor.contains(r#"OccurrenceCount="10""#));
}
