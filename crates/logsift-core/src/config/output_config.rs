use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_OUTPUT_DIR, DEFAULT_TOP_N};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving every output set. Default: "logsift-out".
    pub dir: Option<String>,
    /// Rows in the intent/event frequency tables. Default: 10.
    pub top_n: Option<usize>,
}

impl OutputConfig {
    pub fn effective_dir(&self) -> &str {
        self.dir.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR)
    }

    pub fn effective_top_n(&self) -> usize {
        self.top_n.unwrap_or(DEFAULT_TOP_N)
    }
}
