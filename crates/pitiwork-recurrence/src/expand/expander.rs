//! Window-bounded expansion of a rule into occurrences.

use std::sync::Arc;

use chrono::NaiveDate;
use pitiwork_core::config::RecurrenceConfig;
use pitiwork_core::constants::{DEFAULT_HORIZON_YEARS, DEFAULT_MAX_ITERATIONS};

use super::PatternWalk;
use crate::error::{RecurrenceError, RecurrenceResult};
use crate::model::{EventTemplate, Occurrence, QueryWindow, RecurrenceRule, Termination};

/// ## Summary
/// Bounds applied while walking a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionOptions {
    /// Maximum candidate dates evaluated per call; the walk is silently cut
    /// short (and a warning logged) when reached.
    pub max_iterations: usize,
    /// Years past the window end that bound patterns without an end date.
    pub horizon_years: u32,
}

impl Default for ExpansionOptions {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            horizon_years: DEFAULT_HORIZON_YEARS,
        }
    }
}

impl TryFrom<&RecurrenceConfig> for ExpansionOptions {
    type Error = RecurrenceError;

    fn try_from(config: &RecurrenceConfig) -> RecurrenceResult<Self> {
        config.validate()?;
        Ok(Self {
            max_iterations: config.max_iterations,
            horizon_years: config.horizon_years,
        })
    }
}

impl ExpansionOptions {
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    #[must_use]
    pub fn with_horizon_years(mut self, horizon_years: u32) -> Self {
        self.horizon_years = horizon_years;
        self
    }
}

/// ## Summary
/// Expands one recurrence rule into the occurrences that fall in a window.
///
/// Occurrence numbering counts every match from the anchor, so the id of the
/// n-th occurrence does not depend on the window that was queried.
#[derive(Debug, Clone, Copy)]
pub struct Expander<'a> {
    rule: &'a RecurrenceRule,
    options: ExpansionOptions,
}

impl<'a> Expander<'a> {
    #[must_use]
    pub fn new(rule: &'a RecurrenceRule) -> Self {
        Self {
            rule,
            options: ExpansionOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ExpansionOptions) -> Self {
        self.options = options;
        self
    }

    /// Last date the pattern may occur on for this window.
    #[must_use]
    pub fn pattern_end(&self, window: &QueryWindow) -> NaiveDate {
        match self.rule.termination {
            Termination::EndDate { end } => end.date(),
            Termination::OccurrenceCount { .. } | Termination::Unbounded => {
                window.horizon(self.options.horizon_years)
            }
        }
    }

    #[must_use]
    pub fn max_occurrences(&self) -> Option<u32> {
        match self.rule.termination {
            Termination::OccurrenceCount { count } => Some(count),
            Termination::EndDate { .. } | Termination::Unbounded => None,
        }
    }

    /// Occurrences of the rule inside `window`, in ascending start order.
    ///
    /// A rule whose predicate never matches yields an empty vector.
    #[must_use]
    #[tracing::instrument(
        skip_all,
        fields(
            template_id = %template.id,
            pattern = ?self.rule.pattern,
            window_start = %window.start(),
            window_end = %window.end(),
        )
    )]
    pub fn expand<P>(
        &self,
        template: &Arc<EventTemplate<P>>,
        window: &QueryWindow,
    ) -> Vec<Occurrence<P>> {
        // Nothing past the window end can be emitted and the cursor never moves
        // backwards, so the walk stops there.
        let until = self.pattern_end(window).min(window.end());
        let mut walk = PatternWalk::new(
            self.rule.pattern,
            self.rule.anchor_date(),
            until,
            self.options.max_iterations,
        )
        .with_max_matches(self.max_occurrences());

        let time = self.rule.anchor_start.time();
        let occurrences: Vec<_> = walk
            .by_ref()
            .filter(|m| window.contains(m.date))
            .map(|m| Occurrence::materialize(template, m.date, time, m.index))
            .collect();

        if walk.truncated() {
            tracing::warn!(
                limit = self.options.max_iterations,
                emitted = occurrences.len(),
                "Recurrence expansion hit the iteration limit, results truncated"
            );
        } else {
            tracing::trace!(
                iterations = walk.iterations(),
                emitted = occurrences.len(),
                "Recurrence expanded"
            );
        }

        occurrences
    }
}

/// Expands `rule` for `template` within `window` using default options.
#[must_use]
pub fn expand<P>(
    rule: &RecurrenceRule,
    template: &Arc<EventTemplate<P>>,
    window: &QueryWindow,
) -> Vec<Occurrence<P>> {
    Expander::new(rule).expand(template, window)
}
