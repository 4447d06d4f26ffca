use serde::{Deserialize, Serialize};

use super::default_list;
use crate::constants::{DEFAULT_DROP_EMPTY_RESPONSE, DEFAULT_EXCLUDED_INTENTS};

/// Record removal applied right after the legitimacy filter.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PrefilterConfig {
    /// Intents whose records are removed. Empty means the default list.
    pub excluded_intents: Vec<String>,
    /// Remove records with an empty response. Default: true.
    pub drop_empty_response: Option<bool>,
}

impl PrefilterConfig {
    pub fn effective_excluded_intents(&self) -> Vec<String> {
        if self.excluded_intents.is_empty() {
            default_list(DEFAULT_EXCLUDED_INTENTS)
        } else {
            self.excluded_intents.clone()
        }
    }

    pub fn effective_drop_empty_response(&self) -> bool {
        self.drop_empty_response.unwrap_or(DEFAULT_DROP_EMPTY_RESPONSE)
    }
}
