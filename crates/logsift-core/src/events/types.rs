//! Event payload types.

use std::fmt;

/// A pipeline stage, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Load,
    Legitimacy,
    Prefilter,
    Corpus,
    DomainSplit,
    OutcomeSplit,
    DoubtResolution,
    Recovery,
    FinalFilter,
    Report,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Legitimacy => "legitimacy",
            Self::Prefilter => "prefilter",
            Self::Corpus => "corpus",
            Self::DomainSplit => "domain_split",
            Self::OutcomeSplit => "outcome_split",
            Self::DoubtResolution => "doubt_resolution",
            Self::Recovery => "recovery",
            Self::FinalFilter => "final_filter",
            Self::Report => "report",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload for `on_stage_started`.
#[derive(Debug, Clone)]
pub struct StageStartedEvent {
    pub stage: Stage,
    pub input: usize,
}

/// Payload for `on_stage_completed`.
#[derive(Debug, Clone)]
pub struct StageCompletedEvent {
    pub stage: Stage,
    pub input: usize,
    /// Named output sizes, e.g. `("domain", 120)`.
    pub outputs: Vec<(String, usize)>,
    pub duration_ms: u64,
}

/// Payload for `on_lookup_failed`.
#[derive(Debug, Clone)]
pub struct LookupFailedEvent {
    pub stage: Stage,
    /// Token or query that failed.
    pub subject: String,
    pub reason: String,
}

/// Payload for `on_result_cap_reached`.
#[derive(Debug, Clone)]
pub struct ResultCapReachedEvent {
    pub stage: Stage,
    pub index: String,
    pub returned: usize,
    pub total: usize,
}

/// Payload for `on_malformed_timestamp`.
#[derive(Debug, Clone)]
pub struct MalformedTimestampEvent {
    pub session_id: String,
    pub timestamp: String,
}

/// Payload for `on_ambiguous_records`.
#[derive(Debug, Clone)]
pub struct AmbiguousRecordsEvent {
    pub category: String,
    pub count: usize,
    pub policy: String,
}

/// Payload for `on_run_completed`.
#[derive(Debug, Clone)]
pub struct RunCompletedEvent {
    pub run_id: String,
    pub duration_ms: u64,
    pub failures: usize,
    pub warnings: usize,
}
