//! Per-stage span, timing, and start/complete events.

use std::time::Instant;

use logsift_core::events::{EventDispatcher, Stage, StageCompletedEvent, StageStartedEvent};
use logsift_observability::stage_span;

pub(crate) struct StageRun<'a> {
    stage: Stage,
    input: usize,
    started: Instant,
    events: &'a EventDispatcher,
    _span: tracing::span::EnteredSpan,
}

impl<'a> StageRun<'a> {
    pub(crate) fn begin(events: &'a EventDispatcher, stage: Stage, input: usize) -> Self {
        let span = stage_span!(stage, input).entered();
        events.emit_stage_started(&StageStartedEvent { stage, input });
        Self {
            stage,
            input,
            started: Instant::now(),
            events,
            _span: span,
        }
    }

    pub(crate) fn finish(self, outputs: &[(&str, usize)]) {
        self.events.emit_stage_completed(&StageCompletedEvent {
            stage: self.stage,
            input: self.input,
            outputs: outputs
                .iter()
                .map(|(name, count)| (name.to_string(), *count))
                .collect(),
            duration_ms: self.started.elapsed().as_millis() as u64,
        });
    }
}
