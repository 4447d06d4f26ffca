use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_LOG_FILTER, DEFAULT_LOG_JSON};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive. `LOGSIFT_LOG` takes precedence at runtime.
    pub filter: Option<String>,
    /// Emit JSON lines instead of the human-readable format.
    pub json: Option<bool>,
}

impl LoggingConfig {
    pub fn effective_filter(&self) -> &str {
        self.filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    pub fn effective_json(&self) -> bool {
        self.json.unwrap_or(DEFAULT_LOG_JSON)
    }
}
