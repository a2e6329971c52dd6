use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::descriptor::ParseError;

/// Recurrence codec and expansion errors
#[derive(Error, Debug)]
pub enum RecurrenceError {
    #[error("Descriptor parse error: {0}")]
    ParseError(#[from] ParseError),

    #[error("Descriptor write error: {0}")]
    WriteError(#[from] std::io::Error),

    #[error("Invalid recurrence rule: {0}")]
    InvalidRule(String),

    #[error("Invalid query window: start {start} is after end {end}")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },

    #[error("Invalid event template '{id}': end {end_on} precedes start {start_on}")]
    InvalidTemplate {
        id: String,
        start_on: NaiveDateTime,
        end_on: NaiveDateTime,
    },

    #[error("Record error: {0}")]
    RecordError(#[from] serde_json::Error),

    #[error(transparent)]
    CoreError(#[from] pitiwork_core::error::CoreError),
}

pub type RecurrenceResult<T> = std::result::Result<T, RecurrenceError>;
