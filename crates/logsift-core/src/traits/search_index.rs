//! Full-text search index abstraction.

use std::sync::Arc;

use crate::errors::IndexError;
use crate::models::{Record, RecordSet};
use crate::query::SearchQuery;

/// Hits returned by one search.
#[derive(Debug, Clone, Default)]
pub struct SearchHits {
    /// Matching records, at most the requested size. No guaranteed order.
    pub hits: Vec<Arc<Record>>,
    /// Number of matching documents the index reported, which may exceed `hits.len()`.
    pub total: usize,
}

impl SearchHits {
    /// True when the result cap cut the hit list short.
    pub fn truncated(&self) -> bool {
        self.total > self.hits.len()
    }
}

/// A searchable view over one record set.
///
/// Implementations must be safe to query from several threads at once;
/// recovery detection fans its phrase queries out over a pool.
pub trait SearchIndex: Send + Sync {
    /// Index name, used in logs and error messages.
    fn name(&self) -> &str;

    /// Run `query`, returning at most `size` hits (further capped by
    /// [`SearchIndex::max_results`]).
    fn search(&self, query: &SearchQuery, size: usize) -> Result<SearchHits, IndexError>;

    /// Hard ceiling on hits per query.
    fn max_results(&self) -> usize;
}

/// Builds indexes over record sets.
///
/// This is the index-client handle each component receives at construction.
pub trait IndexBackend: Send + Sync {
    /// Backend label (`memory`, `elasticsearch`).
    fn kind(&self) -> &'static str;

    /// Index `records` under `name`, replacing any existing index of that name.
    fn open(&self, name: &str, records: &RecordSet) -> Result<Arc<dyn SearchIndex>, IndexError>;
}
