//! Pipeline event handler that writes every event to the tracing log.

use logsift_core::events::*;

use crate::tracing_setup::events;

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventHandler;

impl PipelineEventHandler for TracingEventHandler {
    fn on_stage_started(&self, event: &StageStartedEvent) {
        events::stage_started(event.stage, event.input);
    }

    fn on_stage_completed(&self, event: &StageCompletedEvent) {
        events::stage_completed(event.stage, event.input, &event.outputs, event.duration_ms);
    }

    fn on_lookup_failed(&self, event: &LookupFailedEvent) {
        events::lookup_failed(event.stage, &event.subject, &event.reason);
    }

    fn on_result_cap_reached(&self, event: &ResultCapReachedEvent) {
        events::result_cap_reached(event.stage, &event.index, event.returned, event.total);
    }

    fn on_malformed_timestamp(&self, event: &MalformedTimestampEvent) {
        events::malformed_timestamp(&event.session_id, &event.timestamp);
    }

    fn on_ambiguous_records(&self, event: &AmbiguousRecordsEvent) {
        events::ambiguous_records(&event.category, event.count, &event.policy);
    }

    fn on_run_completed(&self, event: &RunCompletedEvent) {
        events::run_completed(&event.run_id, event.duration_ms, event.failures, event.warnings);
    }
}
