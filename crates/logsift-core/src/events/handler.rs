//! PipelineEventHandler trait, every method a no-op by default.

use super::types::*;

/// Trait for observing pipeline events.
///
/// Handlers override only the events they care about. `Send + Sync` so a
/// handler can be shared with worker threads.
pub trait PipelineEventHandler: Send + Sync {
    // ---- Stage lifecycle ----
    fn on_stage_started(&self, _event: &StageStartedEvent) {}
    fn on_stage_completed(&self, _event: &StageCompletedEvent) {}

    // ---- Degradations ----
    fn on_lookup_failed(&self, _event: &LookupFailedEvent) {}
    fn on_result_cap_reached(&self, _event: &ResultCapReachedEvent) {}
    fn on_malformed_timestamp(&self, _event: &MalformedTimestampEvent) {}
    fn on_ambiguous_records(&self, _event: &AmbiguousRecordsEvent) {}

    // ---- Run ----
    fn on_run_completed(&self, _event: &RunCompletedEvent) {}
}
