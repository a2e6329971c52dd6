//! `RecurrenceInfo` descriptor codec.
//!
//! The descriptor is a single XML element whose attributes carry the whole
//! rule. This module decodes it with `quick-xml` into a [`RecurrenceRule`]
//! and writes a rule back out with a recomputed occurrence count.
//!
//! [`RecurrenceRule`]: crate::model::RecurrenceRule

mod build;
mod error;
mod parse;


pub use build::{EncodeWarning, EncodedDescriptor, encode, encode_with_report};
pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use parse::decode;
