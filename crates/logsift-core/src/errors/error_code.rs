//! Structured error codes shared by every error enum.

/// Trait giving every logsift error a stable, machine-readable code.
pub trait LogsiftErrorCode {
    /// Returns the error code string (e.g., "INDEX_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const INDEX_ERROR: &str = "INDEX_ERROR";
pub const INDEX_UNREACHABLE: &str = "INDEX_UNREACHABLE";
pub const LEXICON_ERROR: &str = "LEXICON_ERROR";
pub const CORPUS_ERROR: &str = "CORPUS_ERROR";
pub const CLASSIFY_ERROR: &str = "CLASSIFY_ERROR";
pub const RECOVERY_ERROR: &str = "RECOVERY_ERROR";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
