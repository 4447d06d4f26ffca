use serde::{Deserialize, Serialize};

use super::default_list;
use crate::constants::{DEFAULT_RECOVERY_CONCURRENCY, DEFAULT_TIMESTAMP_FORMATS};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RecoveryConfig {
    /// Concurrent phrase queries. Default: 8.
    pub concurrency: Option<usize>,
    /// chrono formats tried in order after RFC 3339.
    pub timestamp_formats: Vec<String>,
}

impl RecoveryConfig {
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.unwrap_or(DEFAULT_RECOVERY_CONCURRENCY)
    }

    pub fn effective_timestamp_formats(&self) -> Vec<String> {
        if self.timestamp_formats.is_empty() {
            default_list(DEFAULT_TIMESTAMP_FORMATS)
        } else {
            self.timestamp_formats.clone()
        }
    }
}
