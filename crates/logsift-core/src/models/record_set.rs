//! Named, deduplicated, immutable record collections with set algebra.
//!
//! Every operation compares records by full-field equality and returns a new
//! set; the inputs are never modified. Order is first-occurrence order, which
//! keeps outputs deterministic for a given input.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use super::Record;

/// A named, deduplicated snapshot of shared records.
#[derive(Debug, Clone)]
pub struct RecordSet {
    name: String,
    records: Arc<[Arc<Record>]>,
}

impl RecordSet {
    /// Build a set from owned records, dropping duplicates.
    pub fn new(name: impl Into<String>, records: impl IntoIterator<Item = Record>) -> Self {
        Self::from_shared(name, records.into_iter().map(Arc::new))
    }

    /// Build a set from shared records, dropping duplicates.
    pub fn from_shared(
        name: impl Into<String>,
        records: impl IntoIterator<Item = Arc<Record>>,
    ) -> Self {
        Self::collect_counting(name, records).0
    }

    /// Build a set and report how many duplicates were dropped.
    pub fn collect_counting(
        name: impl Into<String>,
        records: impl IntoIterator<Item = Arc<Record>>,
    ) -> (Self, usize) {
        let mut seen: FxHashSet<Arc<Record>> = FxHashSet::default();
        let mut kept = Vec::new();
        let mut duplicates = 0;
        for record in records {
            if seen.insert(Arc::clone(&record)) {
                kept.push(record);
            } else {
                duplicates += 1;
            }
        }
        (
            Self {
                name: name.into(),
                records: kept.into(),
            },
            duplicates,
        )
    }

    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: Arc::from(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Record>> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[Arc<Record>] {
        &self.records
    }

    /// Same records under a different name. Shares storage.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: Arc::clone(&self.records),
        }
    }

    pub fn contains(&self, record: &Record) -> bool {
        self.records.iter().any(|r| r.as_ref() == record)
    }

    /// Records of `self` followed by records of `other` not already present.
    pub fn union(&self, other: &RecordSet, name: impl Into<String>) -> RecordSet {
        Self::from_shared(name, self.iter().chain(other.iter()).cloned())
    }

    /// Records of `self` absent from `other`.
    pub fn difference(&self, other: &RecordSet, name: impl Into<String>) -> RecordSet {
        let exclude = other.lookup();
        Self::from_shared(
            name,
            self.iter()
                .filter(|r| !exclude.contains(r.as_ref()))
                .cloned(),
        )
    }

    /// Records of `self` also present in `other`.
    pub fn intersection(&self, other: &RecordSet, name: impl Into<String>) -> RecordSet {
        let keep = other.lookup();
        Self::from_shared(
            name,
            self.iter().filter(|r| keep.contains(r.as_ref())).cloned(),
        )
    }

    /// Records satisfying `predicate`.
    pub fn filter(
        &self,
        name: impl Into<String>,
        mut predicate: impl FnMut(&Record) -> bool,
    ) -> RecordSet {
        Self::from_shared(name, self.iter().filter(|r| predicate(r)).cloned())
    }

    /// Split into (matching, rest).
    pub fn partition(
        &self,
        matching: impl Into<String>,
        rest: impl Into<String>,
        mut predicate: impl FnMut(&Record) -> bool,
    ) -> (RecordSet, RecordSet) {
        let (yes, no): (Vec<_>, Vec<_>) = self.iter().cloned().partition(|r| predicate(r));
        (Self::from_shared(matching, yes), Self::from_shared(rest, no))
    }

    /// True when both sets hold the same records, ignoring order and name.
    pub fn same_members(&self, other: &RecordSet) -> bool {
        self.len() == other.len() && {
            let theirs = other.lookup();
            self.iter().all(|r| theirs.contains(r.as_ref()))
        }
    }

    fn lookup(&self) -> FxHashSet<&Record> {
        self.records.iter().map(|r| r.as_ref()).collect()
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Arc<Record>;
    type IntoIter = std::slice::Iter<'a, Arc<Record>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
