//! Recovery detection errors.

use super::error_code::{self, LogsiftErrorCode};
use super::IndexError;

/// Errors that abort recovery detection.
#[derive(Debug, thiserror::Error)]
pub enum RecoveryError {
    #[error("failed to build recovery worker pool: {reason}")]
    PoolUnavailable { reason: String },

    #[error("could not open index for {set}: {source}")]
    IndexUnavailable {
        set: String,
        #[source]
        source: IndexError,
    },

    #[error("invalid timestamp format {format:?}: {reason}")]
    InvalidFormat { format: String, reason: String },
}

impl LogsiftErrorCode for RecoveryError {
    fn error_code(&self) -> &'static str {
        error_code::RECOVERY_ERROR
    }
}
