//! Parsing statistics and result structures

use crate::Error;
use crate::app::models::TypedRecord;
use crate::constants::MAX_RECORDED_ERRORS;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parsing result with records and statistics
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    /// Successfully classified records, in message order
    pub records: Vec<TypedRecord>,

    pub stats: ParseStats,
}

/// Per-file (or aggregated) parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Messages found after splitting
    pub total_messages: usize,

    /// Messages turned into records
    pub records_parsed: usize,

    /// Messages that failed to parse
    pub messages_skipped: usize,

    /// Parsed messages left out of the result by configuration
    pub messages_filtered: usize,

    /// Failure counts by error kind
    pub errors_by_kind: BTreeMap<String, usize>,

    /// Record counts by record kind
    pub records_by_kind: BTreeMap<String, usize>,

    /// First failure messages, capped
    pub errors: Vec<String>,
}

impl ParseStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self, record: &TypedRecord) {
        self.records_parsed += 1;
        *self
            .records_by_kind
            .entry(record.kind.as_str().to_string())
            .or_default() += 1;
    }

    /// Count a failed message; `context` identifies it in the error list
    pub fn record_failure(&mut self, context: &str, error: &Error) {
        self.messages_skipped += 1;
        *self.errors_by_kind.entry(error.kind().to_string()).or_default() += 1;
        if self.errors.len() < MAX_RECORDED_ERRORS {
            self.errors.push(format!("{}: {}", context, error));
        }
    }

    /// Fold another file's statistics into this one
    pub fn merge(&mut self, other: &ParseStats) {
        self.total_messages += other.total_messages;
        self.records_parsed += other.records_parsed;
        self.messages_skipped += other.messages_skipped;
        self.messages_filtered += other.messages_filtered;
        for (kind, count) in &other.errors_by_kind {
            *self.errors_by_kind.entry(kind.clone()).or_default() += count;
        }
        for (kind, count) in &other.records_by_kind {
            *self.records_by_kind.entry(kind.clone()).or_default() += count;
        }
        let room = MAX_RECORDED_ERRORS.saturating_sub(self.errors.len());
        self.errors.extend(other.errors.iter().take(room).cloned());
    }

    /// Share of messages that produced a record, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_messages == 0 {
            0.0
        } else {
            ((self.records_parsed + self.messages_filtered) as f64 / self.total_messages as f64)
                * 100.0
        }
    }

    pub fn has_failures(&self) -> bool {
        self.messages_skipped > 0
    }
}
