//! Record CSVs with the `SessionID,Timestamp,IntentName,Event,UserInput,Response` header.

use std::path::Path;

use logsift_core::errors::StorageError;
use logsift_core::models::{Record, RecordSet};

use crate::{csv_error, io_error};

/// Read every row of a record CSV, in file order.
///
/// Missing columns read as empty strings; extra columns are ignored.
pub fn read_records(path: &Path) -> Result<Vec<Record>, StorageError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;
    reader
        .deserialize::<Record>()
        .map(|row| row.map_err(|e| csv_error(path, e)))
        .collect()
}

/// Read a record CSV into a deduplicated set, returning the number of
/// duplicate rows dropped alongside it.
pub fn read_record_set(path: &Path, name: &str) -> Result<(RecordSet, usize), StorageError> {
    let records = read_records(path)?;
    let (set, duplicates) = RecordSet::collect_counting(name, records.into_iter().map(std::sync::Arc::new));
    tracing::debug!(path = %path.display(), records = set.len(), duplicates, "record set loaded");
    Ok((set, duplicates))
}

pub fn write_records(path: &Path, set: &RecordSet) -> Result<(), StorageError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| csv_error(path, e))?;
    if set.is_empty() {
        // serde-driven headers are only written with the first row.
        writer
            .write_record(HEADER)
            .map_err(|e| csv_error(path, e))?;
    }
    for record in set {
        writer
            .serialize(record.as_ref())
            .map_err(|e| csv_error(path, e))?;
    }
    writer.flush().map_err(|e| io_error(path, e))?;
    tracing::debug!(path = %path.display(), records = set.len(), "record set written");
    Ok(())
}

pub(crate) const HEADER: [&str; 6] = [
    "SessionID",
    "Timestamp",
    "IntentName",
    "Event",
    "UserInput",
    "Response",
];
