//! Keyword matching against a search index.
//!
//! A record matches a keyword when the keyword fuzzy-matches every listed
//! field (every term of the keyword, per field). `AnyOf` selects records
//! matching at least one keyword; `NoneOf` selects the rest. The keyword
//! disjunction is sent in batches of at most `max_clauses` clauses.

use logsift_core::constants::DEFAULT_MAX_CLAUSES;
use logsift_core::events::{EventDispatcher, LookupFailedEvent, ResultCapReachedEvent, Stage};
use logsift_core::models::{KeywordCorpus, RecordSet};
use logsift_core::query::{Fuzziness, MatchMode, RecordField, SearchQuery};
use logsift_core::traits::SearchIndex;

/// Result of one keyword match plus degradation counts.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub matched: RecordSet,
    pub queries: usize,
    pub failed_queries: usize,
    pub truncated_queries: usize,
}

#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    fuzziness: Fuzziness,
    max_clauses: usize,
    events: EventDispatcher,
}

impl Default for KeywordMatcher {
    fn default() -> Self {
        Self::new(Fuzziness::default(), DEFAULT_MAX_CLAUSES)
    }
}

impl KeywordMatcher {
    pub fn new(fuzziness: Fuzziness, max_clauses: usize) -> Self {
        Self {
            fuzziness,
            max_clauses: max_clauses.max(1),
            events: EventDispatcher::new(),
        }
    }

    pub fn with_events(mut self, events: EventDispatcher) -> Self {
        self.events = events;
        self
    }

    pub fn fuzziness(&self) -> Fuzziness {
        self.fuzziness
    }

    /// Match `corpus` against `index`, which must hold exactly `source`.
    ///
    /// A failed batch counts as "no keyword matched" for that batch.
    #[allow(clippy::too_many_arguments)]
    pub fn run(
        &self,
        index: &dyn SearchIndex,
        source: &RecordSet,
        corpus: &KeywordCorpus,
        fields: &[RecordField],
        mode: MatchMode,
        name: &str,
        stage: Stage,
    ) -> MatchOutcome {
        let mut outcome = MatchOutcome {
            matched: RecordSet::empty(name),
            queries: 0,
            failed_queries: 0,
            truncated_queries: 0,
        };
        if corpus.is_empty() || fields.is_empty() {
            if mode == MatchMode::NoneOf {
                outcome.matched = source.renamed(name);
            }
            return outcome;
        }

        let mut combined: Option<RecordSet> = None;
        for (batch_no, batch) in corpus.clauses().chunks(self.max_clauses).enumerate() {
            let clauses = batch.iter().map(|k| self.keyword_clause(k, fields)).collect();
            let query = match mode {
                MatchMode::AnyOf => SearchQuery::should(clauses),
                MatchMode::NoneOf => SearchQuery::must_not(clauses),
            };
            outcome.queries += 1;

            let batch_result = match index.search(&query, index.max_results()) {
                Ok(hits) => {
                    if hits.truncated() {
                        outcome.truncated_queries += 1;
                        tracing::warn!(
                            index = index.name(),
                            returned = hits.hits.len(),
                            total = hits.total,
                            "keyword match hit the result cap; results are incomplete"
                        );
                        self.events.emit_result_cap_reached(&ResultCapReachedEvent {
                            stage,
                            index: index.name().to_string(),
                            returned: hits.hits.len(),
                            total: hits.total,
                        });
                    }
                    RecordSet::from_shared(name, hits.hits)
                }
                Err(e) => {
                    outcome.failed_queries += 1;
                    tracing::warn!(index = index.name(), batch = batch_no, error = %e, "keyword query failed; treating as no match");
                    self.events.emit_lookup_failed(&LookupFailedEvent {
                        stage,
                        subject: format!("{} keyword batch {batch_no}", index.name()),
                        reason: e.to_string(),
                    });
                    match mode {
                        MatchMode::AnyOf => RecordSet::empty(name),
                        MatchMode::NoneOf => source.renamed(name),
                    }
                }
            };

            combined = Some(match (combined, mode) {
                (None, _) => batch_result,
                (Some(acc), MatchMode::AnyOf) => acc.union(&batch_result, name),
                (Some(acc), MatchMode::NoneOf) => acc.intersection(&batch_result, name),
            });
        }

        if let Some(matched) = combined {
            outcome.matched = matched;
        }
        outcome
    }

    fn keyword_clause(&self, keyword: &str, fields: &[RecordField]) -> SearchQuery {
        let per_field = |field: RecordField| SearchQuery::match_all_terms(field, keyword, self.fuzziness);
        match fields {
            [single] => per_field(*single),
            many => SearchQuery::must(many.iter().map(|f| per_field(*f)).collect()),
        }
    }
}
