//! Recovery pair CSVs: the unsuccessful record's six columns followed by
//! the same columns suffixed with `2` for the later attempt.

use std::path::Path;

use serde::Serialize;

use logsift_core::errors::StorageError;
use logsift_core::models::RecoveryPair;

use crate::records_csv::HEADER;
use crate::{csv_error, io_error};

#[derive(Serialize)]
struct PairRow<'a> {
    #[serde(rename = "SessionID")]
    session_id: &'a str,
    #[serde(rename = "Timestamp")]
    timestamp: &'a str,
    #[serde(rename = "IntentName")]
    intent_name: &'a str,
    #[serde(rename = "Event")]
    event: &'a str,
    #[serde(rename = "UserInput")]
    user_input: &'a str,
    #[serde(rename = "Response")]
    response: &'a str,
    #[serde(rename = "SessionID2")]
    session_id2: &'a str,
    #[serde(rename = "Timestamp2")]
    timestamp2: &'a str,
    #[serde(rename = "IntentName2")]
    intent_name2: &'a str,
    #[serde(rename = "Event2")]
    event2: &'a str,
    #[serde(rename = "UserInput2")]
    user_input2: &'a str,
    #[serde(rename = "Response2")]
    response2: &'a str,
}

impl<'a> From<&'a RecoveryPair> for PairRow<'a> {
    fn from(pair: &'a RecoveryPair) -> Self {
        let (u, f) = (&pair.unsuccessful, &pair.followup);
        Self {
            session_id: &u.session_id,
            timestamp: &u.timestamp,
            intent_name: &u.intent_name,
            event: &u.event,
            user_input: &u.user_input,
            response: &u.response,
            session_id2: &f.session_id,
            timestamp2: &f.timestamp,
            intent_name2: &f.intent_name,
            event2: &f.event,
            user_input2: &f.user_input,
            response2: &f.response,
        }
    }
}

pub fn write_pairs(path: &Path, pairs: &[RecoveryPair]) -> Result<(), StorageError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| csv_error(path, e))?;
    if pairs.is_empty() {
        let header: Vec<String> = HEADER
            .iter()
            .map(|h| h.to_string())
            .chain(HEADER.iter().map(|h| format!("{h}2")))
            .collect();
        writer
            .write_record(&header)
            .map_err(|e| csv_error(path, e))?;
    }
    for pair in pairs {
        writer
            .serialize(PairRow::from(pair))
            .map_err(|e| csv_error(path, e))?;
    }
    writer.flush().map_err(|e| io_error(path, e))?;
    Ok(())
}
