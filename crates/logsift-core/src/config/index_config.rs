//! Search index configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BULK_BATCH_SIZE, DEFAULT_INDEX_BACKEND, DEFAULT_INDEX_PREFIX, DEFAULT_INDEX_URL,
    DEFAULT_INITIAL_BACKOFF_MS, DEFAULT_MAX_CLAUSES, DEFAULT_MAX_RESULTS, DEFAULT_MAX_RETRIES,
    DEFAULT_REQUEST_TIMEOUT_MS,
};
use crate::query::Fuzziness;

/// Backends understood by `index.backend`.
pub const BACKENDS: &[&str] = &["memory", "elasticsearch"];

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IndexConfig {
    /// `memory` or `elasticsearch`. Default: memory.
    pub backend: Option<String>,
    /// Base URL of the Elasticsearch-compatible service.
    pub url: Option<String>,
    /// Prefix for index names created by a run. Default: "logsift".
    pub prefix: Option<String>,
    /// Hard ceiling on hits per query. Default: 45000.
    pub max_results: Option<usize>,
    /// Keyword clauses per query before batching. Default: 1000.
    pub max_clauses: Option<usize>,
    /// `AUTO`, `AUTO:low,high`, or a fixed edit count 0..=2. Default: AUTO.
    pub fuzziness: Option<String>,
    pub request_timeout_ms: Option<u64>,
    pub max_retries: Option<u32>,
    pub initial_backoff_ms: Option<u64>,
    /// Documents per bulk request when loading an index. Default: 1000.
    pub bulk_batch_size: Option<usize>,
}

impl IndexConfig {
    pub fn effective_backend(&self) -> &str {
        self.backend.as_deref().unwrap_or(DEFAULT_INDEX_BACKEND)
    }

    pub fn effective_url(&self) -> &str {
        self.url.as_deref().unwrap_or(DEFAULT_INDEX_URL)
    }

    pub fn effective_prefix(&self) -> &str {
        self.prefix.as_deref().unwrap_or(DEFAULT_INDEX_PREFIX)
    }

    pub fn effective_max_results(&self) -> usize {
        self.max_results.unwrap_or(DEFAULT_MAX_RESULTS)
    }

    pub fn effective_max_clauses(&self) -> usize {
        self.max_clauses.unwrap_or(DEFAULT_MAX_CLAUSES)
    }

    /// Parsed fuzziness. An unparsable value falls back to the default;
    /// `LogsiftConfig::validate` rejects it before this is reached.
    pub fn effective_fuzziness(&self) -> Fuzziness {
        self.fuzziness
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    pub fn effective_request_timeout_ms(&self) -> u64 {
        self.request_timeout_ms.unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS)
    }

    pub fn effective_max_retries(&self) -> u32 {
        self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES)
    }

    pub fn effective_initial_backoff_ms(&self) -> u64 {
        self.initial_backoff_ms.unwrap_or(DEFAULT_INITIAL_BACKOFF_MS)
    }

    pub fn effective_bulk_batch_size(&self) -> usize {
        self.bulk_batch_size.unwrap_or(DEFAULT_BULK_BATCH_SIZE)
    }
}
