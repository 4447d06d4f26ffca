//! Newline-delimited lists: phrase lists and keyword files.

use std::path::Path;

use logsift_core::errors::StorageError;

use crate::io_error;

/// Trimmed non-blank lines of `path`, in file order.
pub fn read_list(path: &Path) -> Result<Vec<String>, StorageError> {
    let text = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    Ok(parse_list(&text))
}

pub(crate) fn parse_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
