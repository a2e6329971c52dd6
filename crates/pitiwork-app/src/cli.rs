use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "pitiwork")]
#[command(version, about = "Decode, normalize and expand recurring calendar events")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print a recurrence descriptor as JSON
    Decode {
        /// The `RecurrenceInfo` descriptor
        descriptor: String,
    },
    /// Re-encode a descriptor with a recomputed occurrence count
    Normalize {
        /// The `RecurrenceInfo` descriptor
        descriptor: String,

        /// Event start to count from (e.g. "2024-01-01T09:00:00"), defaults to the descriptor's Start
        #[arg(short, long)]
        start: Option<NaiveDateTime>,
    },
    /// Expand event records into the occurrences visible in a date range
    Expand {
        /// JSON file of event records (an array, or an object with a "value" array)
        #[arg(short, long)]
        events: PathBuf,

        /// First day of the range (e.g. "2024-01-01")
        #[arg(long)]
        from: NaiveDate,

        /// Last day of the range, inclusive
        #[arg(long)]
        to: NaiveDate,
    },
}
