use std::path::Path;

use serde::Serialize;

use logsift_core::errors::StorageError;

use crate::io_error;

/// Pretty-printed JSON.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| StorageError::Serialization {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    std::fs::write(path, json).map_err(|e| io_error(path, e))
}
