//! In-process fuzzy full-text index.
//!
//! Each field is analyzed once at build time into per-document token ids
//! over a field vocabulary. A query is compiled against the vocabulary
//! (fuzzy terms resolve to the set of vocabulary ids within edit distance)
//! and then evaluated per document in parallel.

mod compile;
mod field_index;

use std::sync::Arc;

use rayon::prelude::*;

use logsift_core::errors::IndexError;
use logsift_core::models::{Record, RecordSet};
use logsift_core::query::{RecordField, SearchQuery};
use logsift_core::traits::{IndexBackend, SearchHits, SearchIndex};

use compile::Compiled;
use field_index::FieldIndex;

/// Builds [`MemoryIndex`]es.
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    max_results: usize,
}

impl MemoryBackend {
    pub fn new(max_results: usize) -> Self {
        Self { max_results }
    }
}

impl IndexBackend for MemoryBackend {
    fn kind(&self) -> &'static str {
        "memory"
    }

    fn open(&self, name: &str, records: &RecordSet) -> Result<Arc<dyn SearchIndex>, IndexError> {
        Ok(Arc::new(MemoryIndex::build(name, records, self.max_results)))
    }
}

/// An analyzed snapshot of one record set.
pub struct MemoryIndex {
    name: String,
    docs: Vec<Arc<Record>>,
    fields: Vec<FieldIndex>,
    max_results: usize,
}

impl MemoryIndex {
    pub fn build(name: &str, records: &RecordSet, max_results: usize) -> Self {
        let docs: Vec<Arc<Record>> = records.iter().cloned().collect();
        let fields = RecordField::ALL
            .iter()
            .map(|&field| FieldIndex::build(docs.iter().map(|d| d.field(field))))
            .collect();
        tracing::debug!(index = name, docs = docs.len(), "memory index built");
        Self {
            name: name.to_string(),
            docs,
            fields,
            max_results,
        }
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    fn field(&self, field: RecordField) -> &FieldIndex {
        let slot = RecordField::ALL
            .iter()
            .position(|f| *f == field)
            .unwrap_or_default();
        &self.fields[slot]
    }
}

impl SearchIndex for MemoryIndex {
    fn name(&self) -> &str {
        &self.name
    }

    fn search(&self, query: &SearchQuery, size: usize) -> Result<SearchHits, IndexError> {
        let compiled = Compiled::compile(query, &|f| self.field(f));
        let matching: Vec<usize> = (0..self.docs.len())
            .into_par_iter()
            .filter(|&doc| compiled.matches(doc, &|f| self.field(f)))
            .collect();

        let cap = size.min(self.max_results);
        Ok(SearchHits {
            total: matching.len(),
            hits: matching
                .into_iter()
                .take(cap)
                .map(|doc| Arc::clone(&self.docs[doc]))
                .collect(),
        })
    }

    fn max_results(&self) -> usize {
        self.max_results
    }
}
