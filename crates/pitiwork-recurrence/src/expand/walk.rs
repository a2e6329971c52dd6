use chrono::NaiveDate;

use super::Cursor;
use crate::model::RecurrencePattern;

/// A date on which a pattern occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternMatch {
    /// 1-based position counted from the anchor.
    pub index: u32,
    pub date: NaiveDate,
}

/// Iterator over a pattern's matches, in ascending date order.
///
/// Stops at the first of: the cursor passing `until`, `max_matches` matches, or
/// `max_iterations` evaluated candidates. Only the last case sets `truncated`.
#[derive(Debug, Clone)]
pub struct PatternWalk {
    pattern: RecurrencePattern,
    cursor: Option<Cursor>,
    until: NaiveDate,
    max_matches: Option<u32>,
    max_iterations: usize,
    iterations: usize,
    matches: u32,
    truncated: bool,
}

impl PatternWalk {
    #[must_use]
    pub fn new(
        pattern: RecurrencePattern,
        anchor: NaiveDate,
        until: NaiveDate,
        max_iterations: usize,
    ) -> Self {
        Self {
            pattern,
            cursor: Cursor::start(pattern, anchor),
            until,
            max_matches: None,
            max_iterations,
            iterations: 0,
            matches: 0,
            truncated: false,
        }
    }

    #[must_use]
    pub fn with_max_matches(mut self, max_matches: Option<u32>) -> Self {
        self.max_matches = max_matches;
        self
    }

    /// Whether the iteration cap ended the walk early.
    #[must_use]
    pub const fn truncated(&self) -> bool {
        self.truncated
    }

    #[must_use]
    pub const fn iterations(&self) -> usize {
        self.iterations
    }

    #[must_use]
    pub const fn matches(&self) -> u32 {
        self.matches
    }
}

impl Iterator for PatternWalk {
    type Item = PatternMatch;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let cursor = self.cursor?;

            if cursor.date() > self.until
                || self.max_matches.is_some_and(|max| self.matches >= max)
            {
                self.cursor = None;
                return None;
            }

            if self.iterations >= self.max_iterations {
                self.truncated = true;
                self.cursor = None;
                return None;
            }

            self.iterations += 1;
            let step = cursor.step(self.pattern);
            self.cursor = step.next;

            if step.matched {
                self.matches += 1;
                return Some(PatternMatch {
                    index: self.matches,
                    date: cursor.date(),
                });
            }
        }
    }
}
