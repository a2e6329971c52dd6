//! Occurrence expansion for recurrence rules.
//!
//! A single date cursor walks the pattern's candidate dates from the anchor;
//! each match is numbered across the whole pattern and materialized when it
//! lands inside the query window.

mod cursor;
mod expander;
mod walk;

pub use cursor::{Cursor, Step};
pub use expander::{ExpansionOptions, Expander, expand};
pub use walk::{PatternMatch, PatternWalk};
