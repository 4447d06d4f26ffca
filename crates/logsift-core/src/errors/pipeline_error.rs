//! Pipeline errors.

use super::error_code::LogsiftErrorCode;
use super::{
    ClassifyError, ConfigError, CorpusError, IndexError, LexiconError, RecoveryError,
    StorageError,
};

/// Errors that can abort a pipeline run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Index error: {0}")]
    Index(#[from] IndexError),

    #[error("Lexicon error: {0}")]
    Lexicon(#[from] LexiconError),

    #[error("Corpus error: {0}")]
    Corpus(#[from] CorpusError),

    #[error("Classification error: {0}")]
    Classify(#[from] ClassifyError),

    #[error("Recovery error: {0}")]
    Recovery(#[from] RecoveryError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl LogsiftErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Index(e) => e.error_code(),
            Self::Lexicon(e) => e.error_code(),
            Self::Corpus(e) => e.error_code(),
            Self::Classify(e) => e.error_code(),
            Self::Recovery(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
        }
    }
}
