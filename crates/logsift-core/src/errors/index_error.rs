//! Search index errors.

use super::error_code::{self, LogsiftErrorCode};

/// Errors raised by a search index backend.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("index {index} unreachable: {reason}")]
    Unreachable { index: String, reason: String },

    #[error("index {index} returned status {status}: {body}")]
    BadStatus {
        index: String,
        status: u16,
        body: String,
    },

    #[error("malformed response from index {index}: {reason}")]
    MalformedResponse { index: String, reason: String },

    #[error("failed to load {count} records into index {index}: {reason}")]
    LoadFailed {
        index: String,
        count: usize,
        reason: String,
    },
}

impl LogsiftErrorCode for IndexError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Unreachable { .. } => error_code::INDEX_UNREACHABLE,
            _ => error_code::INDEX_ERROR,
        }
    }
}
