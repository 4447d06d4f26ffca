//! Elasticsearch-compatible backend.
//!
//! Each opened index is recreated from scratch, bulk-loaded, refreshed,
//! and then queried with the DSL produced by [`dsl::to_dsl`].

mod backend;
pub mod dsl;
mod keyword_source;
mod transport;

pub use backend::{ElasticsearchBackend, ElasticsearchIndex};
pub use keyword_source::ElasticsearchKeywordSource;
pub use transport::{HttpTransport, RequestBody, TransportConfig};
