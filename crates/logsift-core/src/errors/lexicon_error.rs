//! Lexicon predicate errors.

use super::error_code::{self, LogsiftErrorCode};

/// Errors raised by a lexicon lookup.
///
/// None of these abort the legitimacy stage: a failed lookup counts as an
/// invalid token.
#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("lexicon request for {token:?} failed: {reason}")]
    RequestFailed { token: String, reason: String },

    #[error("lexicon response for {token:?} malformed: {reason}")]
    MalformedResponse { token: String, reason: String },

    #[error("lexicon lookup for {token:?} timed out after {timeout_ms}ms")]
    Timeout { token: String, timeout_ms: u64 },

    #[error("lexicon worker unavailable: {reason}")]
    WorkerUnavailable { reason: String },

    #[error("failed to load word list {path}: {reason}")]
    WordListUnavailable { path: String, reason: String },
}

impl LogsiftErrorCode for LexiconError {
    fn error_code(&self) -> &'static str {
        error_code::LEXICON_ERROR
    }
}
