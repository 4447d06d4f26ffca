//! Structured log events for pipeline milestones.
//!
//! Each function emits a `tracing` event with an `event` field naming it.

use logsift_core::events::Stage;

pub fn stage_started(stage: Stage, input: usize) {
    tracing::debug!(event = "stage_started", stage = %stage, input, "stage started");
}

/// Log a completed stage with the size of each output set.
pub fn stage_completed(stage: Stage, input: usize, outputs: &[(String, usize)], duration_ms: u64) {
    tracing::info!(
        event = "stage_completed",
        stage = %stage,
        input,
        outputs = ?outputs,
        duration_ms,
        "stage completed"
    );
}

pub fn lookup_failed(stage: Stage, subject: &str, reason: &str) {
    tracing::warn!(
        event = "lookup_failed",
        stage = %stage,
        subject = %subject,
        reason = %reason,
        "lookup failed, treated as no match"
    );
}

pub fn result_cap_reached(stage: Stage, index: &str, returned: usize, total: usize) {
    tracing::warn!(
        event = "result_cap_reached",
        stage = %stage,
        index = %index,
        returned,
        total,
        "result cap reached, results may be incomplete"
    );
}

pub fn malformed_timestamp(session_id: &str, timestamp: &str) {
    tracing::warn!(
        event = "malformed_timestamp",
        session_id = %session_id,
        timestamp = %timestamp,
        "malformed timestamp"
    );
}

pub fn ambiguous_records(category: &str, count: usize, policy: &str) {
    tracing::warn!(
        event = "ambiguous_records",
        category = %category,
        count,
        policy = %policy,
        "records matched both phrase lists"
    );
}

/// Run-level summary line with total failures.
pub fn run_completed(run_id: &str, duration_ms: u64, failures: usize, warnings: usize) {
    if failures > 0 {
        tracing::warn!(
            event = "run_completed",
            run_id = %run_id,
            duration_ms,
            failures,
            warnings,
            "run completed with degraded lookups"
        );
    } else {
        tracing::info!(
            event = "run_completed",
            run_id = %run_id,
            duration_ms,
            failures,
            warnings,
            "run completed"
        );
    }
}
