//! Error handling for logsift.
//! One error enum per subsystem, `thiserror` only.

pub mod classify_error;
pub mod config_error;
pub mod corpus_error;
pub mod error_code;
pub mod index_error;
pub mod lexicon_error;
pub mod pipeline_error;
pub mod recovery_error;
pub mod storage_error;

pub use classify_error::ClassifyError;
pub use config_error::ConfigError;
pub use corpus_error::CorpusError;
pub use error_code::LogsiftErrorCode;
pub use index_error::IndexError;
pub use lexicon_error::LexiconError;
pub use pipeline_error::PipelineError;
pub use recovery_error::RecoveryError;
pub use storage_error::StorageError;
