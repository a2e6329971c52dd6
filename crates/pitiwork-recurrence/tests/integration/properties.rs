//! Properties that hold for every rule and window.

use std::collections::BTreeMap;

use chrono::Months;
use pitiwork_recurrence::{ExpansionOptions, Expander, expand};

use super::fixtures::*;

fn windows() -> Vec<pitiwork_recurrence::QueryWindow> {
    vec![
        window(date(2024, 1, 1), date(2024, 1, 31)),
        window(date(2024, 2, 1), date(2024, 3, 31)),
        window(date(2024, 1, 31), date(2024, 1, 31)),
        window(date(2023, 6, 1), date(2024, 12, 31)),
        window(date(2027, 12, 1), date(2028, 3, 1)),
    ]
}

#[test]
fn expansion_is_deterministic() {
    for (rule, template) in sample_rules() {
        for query in windows() {
            assert_eq!(
                expand(&rule, &template, &query),
                expand(&rule, &template, &query)
            );
        }
    }
}

#[test]
fn occurrences_are_sorted_and_inside_the_window() {
    for (rule, template) in sample_rules() {
        for query in windows() {
            let occurrences = expand(&rule, &template, &query);

            assert!(
                occurrences.windows(2).all(|pair| pair[0].start < pair[1].start),
                "unsorted output for {:?}",
                rule.pattern
            );
            assert!(
                occurrences.iter().all(|o| query.contains(o.start.date())),
                "occurrence outside {query:?} for {:?}",
                rule.pattern
            );
        }
    }
}

#[test]
fn occurrences_keep_the_template_duration() {
    for (rule, template) in sample_rules() {
        let query = window(date(2024, 1, 1), date(2025, 12, 31));
        for occurrence in expand(&rule, &template, &query) {
            assert_eq!(occurrence.end - occurrence.start, template.duration());
        }
    }
}

#[test]
fn ids_do_not_depend_on_the_queried_window() {
    let combined = window(date(2024, 1, 1), date(2024, 12, 31));

    for (rule, template) in sample_rules() {
        let whole: BTreeMap<_, _> = expand(&rule, &template, &combined)
            .into_iter()
            .map(|o| (o.start, o.id))
            .collect();

        let mut split = BTreeMap::new();
        let mut month_start = combined.start();
        while month_start <= combined.end() {
            let next = month_start + Months::new(1);
            let month = window(month_start, next.pred_opt().expect("valid date"));
            split.extend(
                expand(&rule, &template, &month)
                    .into_iter()
                    .map(|o| (o.start, o.id)),
            );
            month_start = next;
        }

        assert_eq!(whole, split, "ids diverge for {:?}", rule.pattern);
    }
}

#[test_log::test]
fn iteration_limit_truncates_silently() {
    let (rule, template) = sample_rules().swap_remove(0);
    let options = ExpansionOptions::default().with_max_iterations(10);

    let occurrences = Expander::new(&rule)
        .with_options(options)
        .expand(&template, &window(date(2024, 1, 1), date(2024, 12, 31)));

    assert_eq!(occurrences.len(), 10);
    assert_eq!(occurrences.last().map(|o| o.id.as_str()), Some("rule0-10"));
}
