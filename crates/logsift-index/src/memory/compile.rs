//! Query compilation against field vocabularies.

use rustc_hash::{FxHashMap, FxHashSet};

use logsift_core::query::{Fuzziness, Operator, RecordField, SearchQuery};
use logsift_core::text::analyze;

use super::field_index::FieldIndex;

/// A query resolved to vocabulary ids.
pub(super) enum Compiled {
    All,
    Nothing,
    Terms {
        field: RecordField,
        /// One accepted-id set per query term.
        terms: Vec<FxHashSet<u32>>,
        operator: Operator,
    },
    Phrase {
        field: RecordField,
        ids: Vec<u32>,
    },
    Bool {
        must: Vec<Compiled>,
        should: Vec<Compiled>,
        must_not: Vec<Compiled>,
    },
}

type TermCache = FxHashMap<(RecordField, String, usize), FxHashSet<u32>>;

impl Compiled {
    pub(super) fn compile<'a>(
        query: &SearchQuery,
        fields: &dyn Fn(RecordField) -> &'a FieldIndex,
    ) -> Self {
        let mut cache = TermCache::default();
        Self::compile_with(query, fields, &mut cache)
    }

    fn compile_with<'a>(
        query: &SearchQuery,
        fields: &dyn Fn(RecordField) -> &'a FieldIndex,
        cache: &mut TermCache,
    ) -> Self {
        match query {
            SearchQuery::MatchAll => Self::All,
            SearchQuery::Match {
                field,
                text,
                operator,
                fuzziness,
            } => {
                let terms = analyze(text);
                if terms.is_empty() {
                    return Self::Nothing;
                }
                let index = fields(*field);
                let terms = terms
                    .into_iter()
                    .map(|term| {
                        let edits = fuzziness.max_edits(term.chars().count());
                        cache
                            .entry((*field, term, edits))
                            .or_insert_with_key(|(_, term, _)| {
                                resolve_term(index, term, *fuzziness)
                            })
                            .clone()
                    })
                    .collect();
                Self::Terms {
                    field: *field,
                    terms,
                    operator: *operator,
                }
            }
            SearchQuery::MatchPhrase { field, text } => {
                let terms = analyze(text);
                if terms.is_empty() {
                    return Self::Nothing;
                }
                let index = fields(*field);
                let ids: Option<Vec<u32>> = terms.iter().map(|t| index.exact(t)).collect();
                match ids {
                    Some(ids) => Self::Phrase { field: *field, ids },
                    None => Self::Nothing,
                }
            }
            SearchQuery::Bool {
                must,
                should,
                must_not,
            } => {
                let mut all = |qs: &[SearchQuery]| -> Vec<Compiled> {
                    qs.iter().map(|q| Self::compile_with(q, fields, cache)).collect()
                };
                Self::Bool {
                    must: all(must),
                    should: all(should),
                    must_not: all(must_not),
                }
            }
        }
    }

    pub(super) fn matches<'a>(
        &self,
        doc: usize,
        fields: &dyn Fn(RecordField) -> &'a FieldIndex,
    ) -> bool {
        match self {
            Self::All => true,
            Self::Nothing => false,
            Self::Terms {
                field,
                terms,
                operator,
            } => {
                let tokens = fields(*field).tokens(doc);
                let hit = |accepted: &FxHashSet<u32>| tokens.iter().any(|t| accepted.contains(t));
                match operator {
                    Operator::And => terms.iter().all(hit),
                    Operator::Or => terms.iter().any(hit),
                }
            }
            Self::Phrase { field, ids } => fields(*field)
                .tokens(doc)
                .windows(ids.len())
                .any(|w| w == ids.as_slice()),
            Self::Bool {
                must,
                should,
                must_not,
            } => {
                must.iter().all(|q| q.matches(doc, fields))
                    && !must_not.iter().any(|q| q.matches(doc, fields))
                    && (!must.is_empty()
                        || should.is_empty()
                        || should.iter().any(|q| q.matches(doc, fields)))
            }
        }
    }
}

/// Vocabulary ids within the allowed edit distance of `term`.
fn resolve_term(index: &FieldIndex, term: &str, fuzziness: Fuzziness) -> FxHashSet<u32> {
    let len = term.chars().count();
    let edits = fuzziness.max_edits(len);
    if edits == 0 {
        return index.exact(term).into_iter().collect();
    }
    index
        .vocabulary()
        .filter(|(_, candidate)| candidate.chars().count().abs_diff(len) <= edits)
        .filter(|(_, candidate)| strsim::osa_distance(term, candidate) <= edits)
        .map(|(id, _)| id)
        .collect()
}
