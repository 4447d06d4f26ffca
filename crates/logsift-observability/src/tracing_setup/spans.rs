//! Span definitions per operation: stage, lexicon lookup, recovery pass.

/// Span around one pipeline stage.
#[macro_export]
macro_rules! stage_span {
    ($stage:expr, $input:expr) => {
        tracing::info_span!("logsift.stage", stage = %$stage, input = $input)
    };
}

/// Span around one legitimacy worker.
#[macro_export]
macro_rules! lookup_span {
    ($worker:expr, $chunk:expr) => {
        tracing::debug_span!("logsift.lookup", worker = $worker, chunk = $chunk)
    };
}

/// Span around one recovery pass.
#[macro_export]
macro_rules! recovery_span {
    ($pass:expr, $unsuccessful:expr) => {
        tracing::info_span!("logsift.recovery", pass = %$pass, unsuccessful = $unsuccessful)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const STAGE: &str = "logsift.stage";
    pub const LOOKUP: &str = "logsift.lookup";
    pub const RECOVERY: &str = "logsift.recovery";
}
