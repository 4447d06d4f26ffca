//! Synchronous event dispatch.

use std::sync::Arc;

use super::handler::PipelineEventHandler;
use super::types::*;

/// Fans each event out to the registered handlers, in registration order.
///
/// A panicking handler is logged and skipped; later handlers still run.
#[derive(Clone, Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn PipelineEventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handler: Arc<dyn PipelineEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    fn emit<F: Fn(&dyn PipelineEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::error!("pipeline event handler panicked; continuing");
            }
        }
    }

    pub fn emit_stage_started(&self, event: &StageStartedEvent) {
        self.emit(|h| h.on_stage_started(event));
    }

    pub fn emit_stage_completed(&self, event: &StageCompletedEvent) {
        self.emit(|h| h.on_stage_completed(event));
    }

    pub fn emit_lookup_failed(&self, event: &LookupFailedEvent) {
        self.emit(|h| h.on_lookup_failed(event));
    }

    pub fn emit_result_cap_reached(&self, event: &ResultCapReachedEvent) {
        self.emit(|h| h.on_result_cap_reached(event));
    }

    pub fn emit_malformed_timestamp(&self, event: &MalformedTimestampEvent) {
        self.emit(|h| h.on_malformed_timestamp(event));
    }

    pub fn emit_ambiguous_records(&self, event: &AmbiguousRecordsEvent) {
        self.emit(|h| h.on_ambiguous_records(event));
    }

    pub fn emit_run_completed(&self, event: &RunCompletedEvent) {
        self.emit(|h| h.on_run_completed(event));
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
