use rustc_hash::FxHashMap;

use logsift_core::text::analyze;

/// Token ids of one field across every document.
pub(super) struct FieldIndex {
    vocab: FxHashMap<String, u32>,
    terms: Vec<String>,
    docs: Vec<Vec<u32>>,
}

impl FieldIndex {
    pub(super) fn build<'a>(values: impl Iterator<Item = &'a str>) -> Self {
        let mut vocab: FxHashMap<String, u32> = FxHashMap::default();
        let mut terms = Vec::new();
        let docs = values
            .map(|text| {
                analyze(text)
                    .into_iter()
                    .map(|token| {
                        *vocab.entry(token).or_insert_with_key(|t| {
                            terms.push(t.clone());
                            (terms.len() - 1) as u32
                        })
                    })
                    .collect()
            })
            .collect();
        Self { vocab, terms, docs }
    }

    pub(super) fn exact(&self, term: &str) -> Option<u32> {
        self.vocab.get(term).copied()
    }

    /// Vocabulary entries with their ids.
    pub(super) fn vocabulary(&self) -> impl Iterator<Item = (u32, &str)> {
        self.terms.iter().enumerate().map(|(id, t)| (id as u32, t.as_str()))
    }

    pub(super) fn tokens(&self, doc: usize) -> &[u32] {
        &self.docs[doc]
    }
}
