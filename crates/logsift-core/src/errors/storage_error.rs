//! Persistence errors.

use super::error_code::{self, LogsiftErrorCode};

/// Errors raised reading inputs or writing output sets.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    #[error("CSV error in {path}: {message}")]
    Csv { path: String, message: String },

    #[error("serialization error for {path}: {message}")]
    Serialization { path: String, message: String },
}

impl LogsiftErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        error_code::STORAGE_ERROR
    }
}
