//! Keyword corpus errors.

use super::error_code::{self, LogsiftErrorCode};

/// Errors raised while sourcing or preparing the keyword corpus.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("keyword source {source_name} unavailable: {reason}")]
    SourceUnavailable { source_name: String, reason: String },

    #[error("keyword corpus is empty after preprocessing ({raw} raw keywords)")]
    Empty { raw: usize },
}

impl LogsiftErrorCode for CorpusError {
    fn error_code(&self) -> &'static str {
        error_code::CORPUS_ERROR
    }
}
