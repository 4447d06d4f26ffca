//! Run-level counters for non-fatal failures.

use serde::Serialize;

/// Counters and warnings collected over one pipeline run.
///
/// Lookup failures, truncated queries and malformed timestamps degrade
/// precision but never abort a stage; they end up here instead.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub run_id: String,
    pub input_records: usize,
    pub duplicate_records: usize,
    pub lexicon_failures: usize,
    pub lexicon_timeouts: usize,
    pub index_failures: usize,
    pub truncated_queries: usize,
    pub malformed_timestamps: usize,
    pub ambiguous_records: usize,
    pub warnings: Vec<String>,
}

impl RunReport {
    pub fn new() -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            ..Self::default()
        }
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(run_id = %self.run_id, "{message}");
        self.warnings.push(message);
    }

    /// Total of every failure counter.
    pub fn failure_count(&self) -> usize {
        self.lexicon_failures
            + self.lexicon_timeouts
            + self.index_failures
            + self.truncated_queries
            + self.malformed_timestamps
    }
}
