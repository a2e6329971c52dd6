//! Recurring calendar event support.
//!
//! Decodes and encodes the attribute-based `RecurrenceInfo` descriptor stored on
//! calendar records, and expands a decoded rule into the concrete occurrences
//! visible in a query window.

pub mod descriptor;
pub mod error;
pub mod expand;
pub mod feed;
pub mod model;

pub use descriptor::{
    EncodeWarning, EncodedDescriptor, ParseError, ParseErrorKind, ParseResult, decode, encode,
    encode_with_report,
};
pub use error::{RecurrenceError, RecurrenceResult};
pub use expand::{Cursor, ExpansionOptions, Expander, PatternMatch, PatternWalk, Step, expand};
pub use feed::{CalendarEventRecord, expand_record, expand_records, parse_records};
pub use model::{
    EventTemplate, Occurrence, QueryWindow, RecurrencePattern, RecurrenceRule, Termination,
    WeekdayMask,
};
