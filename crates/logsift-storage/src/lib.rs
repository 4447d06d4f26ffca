//! # logsift-storage
//!
//! File hand-off for the pipeline: record CSVs in, record sets, recovery
//! pairs, the monthly series and the JSON summary out.

pub mod keyword_file;
pub mod layout;
pub mod lists;
pub mod monthly_csv;
pub mod pairs_csv;
pub mod records_csv;
pub mod report;

pub use keyword_file::FileKeywordSource;
pub use layout::OutputLayout;
pub use lists::read_list;
pub use monthly_csv::write_monthly;
pub use pairs_csv::write_pairs;
pub use records_csv::{read_record_set, read_records, write_records};
pub use report::write_json;

use std::path::Path;

use logsift_core::errors::StorageError;

pub(crate) fn io_error(path: &Path, e: impl std::fmt::Display) -> StorageError {
    StorageError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

pub(crate) fn csv_error(path: &Path, e: csv::Error) -> StorageError {
    if e.is_io_error() {
        return io_error(path, e);
    }
    StorageError::Csv {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}
