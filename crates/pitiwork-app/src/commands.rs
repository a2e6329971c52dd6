//! Command handlers. Each returns the text to print on stdout.

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, NaiveDateTime};
use pitiwork_core::config::Settings;
use pitiwork_recurrence::{
    EncodeWarning, ExpansionOptions, QueryWindow, decode, encode_with_report, expand_records,
    parse_records,
};

use crate::cli::Command;
use crate::output::OccurrenceView;

/// ## Summary
/// Runs a parsed command against the loaded settings.
///
/// ## Errors
/// Returns an error if the input cannot be read, decoded or serialized.
pub fn run(command: &Command, settings: &Settings) -> Result<String> {
    let options = ExpansionOptions::try_from(&settings.recurrence)?;

    match command {
        Command::Decode { descriptor } => decode_descriptor(descriptor),
        Command::Normalize { descriptor, start } => {
            normalize_descriptor(descriptor, *start, &options)
        }
        Command::Expand { events, from, to } => expand_file(events, *from, *to, &options),
    }
}

/// ## Summary
/// Decodes a descriptor into pretty JSON, `null` when it is empty.
///
/// ## Errors
/// Returns an error if the descriptor is malformed.
pub fn decode_descriptor(descriptor: &str) -> Result<String> {
    let rule = decode(descriptor).context("Failed to decode recurrence descriptor")?;
    Ok(serde_json::to_string_pretty(&rule)?)
}

/// ## Summary
/// Re-encodes a descriptor, recomputing its occurrence count from `start` or
/// from the descriptor's own `Start`.
///
/// ## Errors
/// Returns an error if the descriptor is empty, malformed or describes an
/// invalid rule.
pub fn normalize_descriptor(
    descriptor: &str,
    start: Option<NaiveDateTime>,
    options: &ExpansionOptions,
) -> Result<String> {
    let Some(rule) = decode(descriptor).context("Failed to decode recurrence descriptor")? else {
        bail!("Descriptor is empty, nothing to normalize");
    };

    let start = start.unwrap_or(rule.anchor_start);
    let encoded = encode_with_report(&rule, start, options)?;

    for warning in &encoded.warnings {
        match warning {
            EncodeWarning::OccurrenceCountMismatch { declared, computed } => {
                tracing::warn!(declared, computed, "OccurrenceCount rewritten");
            }
            EncodeWarning::CountTruncated { limit } => {
                tracing::warn!(limit, "Iteration limit reached while walking the rule");
            }
        }
    }

    Ok(encoded.descriptor)
}

/// ## Summary
/// Expands the records of an events file over `[from, to]`.
///
/// ## Errors
/// Returns an error if the file cannot be read or parsed, or `to < from`.
pub fn expand_file(
    events: &Path,
    from: NaiveDate,
    to: NaiveDate,
    options: &ExpansionOptions,
) -> Result<String> {
    let json = std::fs::read_to_string(events)
        .with_context(|| format!("Failed to read events file {}", events.display()))?;
    let window = QueryWindow::new(from, to)?;

    let views = expand_json(&json, &window, options)?;
    tracing::info!(occurrences = views.len(), "Expanded events");

    Ok(serde_json::to_string_pretty(&views)?)
}

/// ## Summary
/// Expands serialized event records into occurrence views.
///
/// ## Errors
/// Returns an error if the JSON is not a record feed.
pub fn expand_json(
    json: &str,
    window: &QueryWindow,
    options: &ExpansionOptions,
) -> Result<Vec<OccurrenceView>> {
    let records = parse_records(json).context("Failed to parse event records")?;

    Ok(expand_records(&records, window, options)
        .iter()
        .map(OccurrenceView::from)
        .collect())
}
