use std::path::Path;

use logsift_core::errors::StorageError;
use logsift_core::models::MonthlyRecoverySeries;

use crate::{csv_error, io_error};

/// Write `month,recovered,unresolved,rate`; rate is two decimals or `no data`.
pub fn write_monthly(path: &Path, series: &MonthlyRecoverySeries) -> Result<(), StorageError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| csv_error(path, e))?;
    writer
        .write_record(["month", "recovered", "unresolved", "rate"])
        .map_err(|e| csv_error(path, e))?;
    for point in &series.points {
        writer
            .write_record([
                point.month.label(),
                point.recovered.to_string(),
                point.unresolved.to_string(),
                point.rate.to_string(),
            ])
            .map_err(|e| csv_error(path, e))?;
    }
    writer.flush().map_err(|e| io_error(path, e))?;
    Ok(())
}
