//! # logsift-index
//!
//! Search index backends behind `logsift_core::traits::{IndexBackend, SearchIndex}`.
//!
//! - [`memory`]: in-process index with analyzed fields and fuzzy term matching.
//! - [`elasticsearch`]: an Elasticsearch-compatible service over blocking HTTP.

pub mod elasticsearch;
pub mod memory;

use std::sync::Arc;
use std::time::Duration;

use logsift_core::config::IndexConfig;
use logsift_core::errors::IndexError;
use logsift_core::traits::IndexBackend;

pub use elasticsearch::{ElasticsearchBackend, ElasticsearchKeywordSource, HttpTransport, TransportConfig};
pub use memory::{MemoryBackend, MemoryIndex};

/// Build the backend named by `index.backend`.
pub fn backend_from_config(config: &IndexConfig) -> Result<Arc<dyn IndexBackend>, IndexError> {
    match config.effective_backend() {
        "elasticsearch" => {
            let transport = Arc::new(HttpTransport::new(transport_config(config))?);
            Ok(Arc::new(ElasticsearchBackend::new(
                transport,
                config.effective_prefix(),
                config.effective_max_results(),
                config.effective_bulk_batch_size(),
            )))
        }
        _ => Ok(Arc::new(MemoryBackend::new(config.effective_max_results()))),
    }
}

/// HTTP transport settings derived from the index section.
pub fn transport_config(config: &IndexConfig) -> TransportConfig {
    TransportConfig {
        base_url: config.effective_url().trim_end_matches('/').to_string(),
        timeout: Duration::from_millis(config.effective_request_timeout_ms()),
        max_retries: config.effective_max_retries(),
        initial_backoff: Duration::from_millis(config.effective_initial_backoff_ms()),
        ..TransportConfig::default()
    }
}
