use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::error::{RecurrenceError, RecurrenceResult};

/// The stored event a recurrence rule is attached to.
///
/// `payload` is carried through to every occurrence untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTemplate<P = ()> {
    pub id: String,
    pub subject: String,
    pub all_day: bool,
    start_on: NaiveDateTime,
    end_on: NaiveDateTime,
    pub payload: P,
}

impl<P> EventTemplate<P> {
    /// ## Summary
    /// Creates a template, checking that it does not end before it starts.
    ///
    /// ## Errors
    /// Returns `InvalidTemplate` if `end_on < start_on`.
    pub fn new(
        id: impl Into<String>,
        subject: impl Into<String>,
        start_on: NaiveDateTime,
        end_on: NaiveDateTime,
        payload: P,
    ) -> RecurrenceResult<Self> {
        let id = id.into();
        if end_on < start_on {
            return Err(RecurrenceError::InvalidTemplate {
                id,
                start_on,
                end_on,
            });
        }

        Ok(Self {
            id,
            subject: subject.into(),
            all_day: false,
            start_on,
            end_on,
            payload,
        })
    }

    #[must_use]
    pub fn with_all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }

    #[must_use]
    pub const fn start_on(&self) -> NaiveDateTime {
        self.start_on
    }

    #[must_use]
    pub const fn end_on(&self) -> NaiveDateTime {
        self.end_on
    }

    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end_on - self.start_on
    }
}

/// One concrete instance of an event, recomputed on every query.
#[derive(Debug)]
pub struct Occurrence<P = ()> {
    /// `{template id}-{index}` for generated occurrences, the template id otherwise.
    pub id: String,
    /// 1-based position within the whole pattern; `None` for non-recurring events.
    pub index: Option<u32>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub source: Arc<EventTemplate<P>>,
}

impl<P> Occurrence<P> {
    /// Places the template on `date` at `time`, keeping its duration.
    pub(crate) fn materialize(
        template: &Arc<EventTemplate<P>>,
        date: NaiveDate,
        time: NaiveTime,
        index: u32,
    ) -> Self {
        let start = date.and_time(time);
        let end = start
            .checked_add_signed(template.duration())
            .unwrap_or(NaiveDateTime::MAX);

        Self {
            id: format!("{}-{index}", template.id),
            index: Some(index),
            start,
            end,
            source: Arc::clone(template),
        }
    }

    /// The template itself as its only occurrence.
    #[must_use]
    pub fn single(template: &Arc<EventTemplate<P>>) -> Self {
        Self {
            id: template.id.clone(),
            index: None,
            start: template.start_on,
            end: template.end_on,
            source: Arc::clone(template),
        }
    }

    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.source.subject
    }

    #[must_use]
    pub fn all_day(&self) -> bool {
        self.source.all_day
    }
}

impl<P> Clone for Occurrence<P> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            index: self.index,
            start: self.start,
            end: self.end,
            source: Arc::clone(&self.source),
        }
    }
}

impl<P> PartialEq for Occurrence<P> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.index == other.index
            && self.start == other.start
            && self.end == other.end
            && Arc::ptr_eq(&self.source, &other.source)
    }
}
