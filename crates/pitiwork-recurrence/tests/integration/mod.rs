//! Integration tests for the recurrence engine.
//!
//! ## Running Tests
//!
//! ```sh
//! cargo test -p pitiwork-recurrence --test recurrence_integration
//! ```

mod fixtures;
mod properties;
mod roundtrip;
mod scenarios;
