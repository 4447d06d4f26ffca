//! Classification errors.

use super::error_code::{self, LogsiftErrorCode};
use super::IndexError;

/// Errors that abort a classification stage.
///
/// Query failures against an open index degrade to "no match" and are
/// counted instead; only failing to build the index is fatal.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("could not open index for {set}: {source}")]
    IndexUnavailable {
        set: String,
        #[source]
        source: IndexError,
    },

    #[error("invalid phrase list {name}: {reason}")]
    InvalidPhraseList { name: String, reason: String },
}

impl LogsiftErrorCode for ClassifyError {
    fn error_code(&self) -> &'static str {
        error_code::CLASSIFY_ERROR
    }
}
