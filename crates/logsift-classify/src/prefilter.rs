//! Record removal between the legitimacy filter and keyword matching.

use rustc_hash::FxHashSet;

use logsift_core::config::PrefilterConfig;
use logsift_core::models::RecordSet;

#[derive(Debug, Clone)]
pub struct PrefilterOutcome {
    pub kept: RecordSet,
    pub removed: RecordSet,
}

/// Drops records carrying an excluded intent and, optionally, records with
/// an empty response.
#[derive(Debug, Clone)]
pub struct Prefilter {
    excluded_intents: FxHashSet<String>,
    drop_empty_response: bool,
}

impl Prefilter {
    pub fn new(excluded_intents: impl IntoIterator<Item = String>, drop_empty_response: bool) -> Self {
        Self {
            excluded_intents: excluded_intents.into_iter().collect(),
            drop_empty_response,
        }
    }

    pub fn from_config(config: &PrefilterConfig) -> Self {
        Self::new(
            config.effective_excluded_intents(),
            config.effective_drop_empty_response(),
        )
    }

    pub fn apply(&self, records: &RecordSet) -> PrefilterOutcome {
        let (removed, kept) = records.partition("prefilter-removed", "prefiltered", |r| {
            self.excluded_intents.contains(r.intent_name.trim())
                || (self.drop_empty_response && r.response.trim().is_empty())
        });
        tracing::debug!(kept = kept.len(), removed = removed.len(), "prefilter applied");
        PrefilterOutcome { kept, removed }
    }
}
