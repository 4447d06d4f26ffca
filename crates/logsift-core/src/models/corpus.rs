//! Prepared keyword corpus.

use rustc_hash::FxHashSet;

/// Domain-entity keywords after preprocessing.
///
/// Each clause is one keyword phrase with stopwords removed. The clause list
/// is the match expression every keyword match in a run reuses: a record
/// matches when any clause matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordCorpus {
    clauses: Vec<String>,
    raw_count: usize,
}

impl KeywordCorpus {
    /// Build from already-prepared clauses.
    ///
    /// Blank clauses and case-insensitive duplicates are dropped.
    pub fn new(clauses: impl IntoIterator<Item = String>, raw_count: usize) -> Self {
        let mut seen = FxHashSet::default();
        let clauses = clauses
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty() && seen.insert(c.to_lowercase()))
            .collect();
        Self {
            clauses,
            raw_count,
        }
    }

    pub fn clauses(&self) -> &[String] {
        &self.clauses
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Number of keywords received from the source before preprocessing.
    pub fn raw_count(&self) -> usize {
        self.raw_count
    }
}
