//! Domain/general split and outcome split.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use logsift_core::config::{ClassifyConfig, OverlapPolicy};
use logsift_core::errors::ClassifyError;
use logsift_core::events::{AmbiguousRecordsEvent, EventDispatcher, Stage};
use logsift_core::models::{Category, KeywordCorpus, Record, RecordSet};
use logsift_core::query::{MatchMode, RecordField};
use logsift_core::text::{contains_ignore_case, normalize};
use logsift_core::traits::IndexBackend;

use crate::matcher::{KeywordMatcher, MatchOutcome};
use crate::phrases::PhraseList;

/// Post-match corrections to the domain/general split, applied in order:
/// filler queries move to general, masked-email queries move to domain,
/// bare yes/no queries are dropped from general.
#[derive(Debug, Clone)]
pub struct DomainOverrides {
    filler_tokens: FxHashSet<String>,
    dropped_tokens: FxHashSet<String>,
    masked_email: String,
}

impl DomainOverrides {
    pub fn new(
        filler_tokens: impl IntoIterator<Item = String>,
        dropped_tokens: impl IntoIterator<Item = String>,
        masked_email: &str,
    ) -> Self {
        Self {
            filler_tokens: token_set(filler_tokens),
            dropped_tokens: token_set(dropped_tokens),
            masked_email: masked_email.to_string(),
        }
    }

    pub fn from_config(config: &ClassifyConfig) -> Self {
        Self::new(
            config.effective_filler_tokens(),
            config.effective_dropped_tokens(),
            config.effective_masked_email(),
        )
    }

    fn is_filler(&self, record: &Record) -> bool {
        self.filler_tokens.contains(&normalize(&record.user_input))
    }

    fn is_masked_email(&self, record: &Record) -> bool {
        contains_ignore_case(&record.user_input, &self.masked_email)
    }

    fn is_dropped(&self, record: &Record) -> bool {
        self.dropped_tokens.contains(&normalize(&record.user_input))
    }
}

fn token_set(tokens: impl IntoIterator<Item = String>) -> FxHashSet<String> {
    tokens.into_iter().map(|t| normalize(&t)).collect()
}

/// Output of [`Partitioner::split_domain`].
///
/// `domain`, `general` and `dropped` are pairwise disjoint and together
/// hold every input record.
#[derive(Debug, Clone)]
pub struct DomainSplit {
    pub domain: RecordSet,
    pub general: RecordSet,
    pub dropped: RecordSet,
    pub matched: MatchOutcome,
    pub moved_to_general: usize,
    pub moved_to_domain: usize,
}

/// Output of [`Partitioner::split_outcome`].
#[derive(Debug, Clone)]
pub struct OutcomeSplit {
    pub category: Category,
    pub unsuccessful: RecordSet,
    pub doubtful: RecordSet,
    pub successful: RecordSet,
    /// Records whose response matched both phrase lists.
    pub ambiguous: RecordSet,
}

pub struct Partitioner {
    backend: Arc<dyn IndexBackend>,
    matcher: KeywordMatcher,
    overrides: DomainOverrides,
    overlap_policy: OverlapPolicy,
    events: EventDispatcher,
}

impl Partitioner {
    pub fn new(
        backend: Arc<dyn IndexBackend>,
        matcher: KeywordMatcher,
        overrides: DomainOverrides,
        overlap_policy: OverlapPolicy,
    ) -> Self {
        Self {
            backend,
            matcher,
            overrides,
            overlap_policy,
            events: EventDispatcher::new(),
        }
    }

    pub fn with_events(mut self, events: EventDispatcher) -> Self {
        self.events = events;
        self
    }

    pub fn overlap_policy(&self) -> OverlapPolicy {
        self.overlap_policy
    }

    /// Records of `records` whose query matches any corpus keyword.
    pub fn keyword_filter(
        &self,
        records: &RecordSet,
        corpus: &KeywordCorpus,
        name: &str,
        stage: Stage,
    ) -> Result<MatchOutcome, ClassifyError> {
        let index = self
            .backend
            .open(records.name(), records)
            .map_err(|source| ClassifyError::IndexUnavailable {
                set: records.name().to_string(),
                source,
            })?;
        Ok(self.matcher.run(
            index.as_ref(),
            records,
            corpus,
            &[RecordField::UserInput],
            MatchMode::AnyOf,
            name,
            stage,
        ))
    }

    /// Split `all` into domain and general by keyword match on the query,
    /// then apply the [`DomainOverrides`].
    pub fn split_domain(
        &self,
        all: &RecordSet,
        corpus: &KeywordCorpus,
    ) -> Result<DomainSplit, ClassifyError> {
        let matched = self.keyword_filter(all, corpus, "domain", Stage::DomainSplit)?;
        let domain = matched.matched.clone();
        let general = all.difference(&domain, "general");

        let (fillers, domain) = domain.partition("fillers", "domain", |r| self.overrides.is_filler(r));
        let general = general.union(&fillers, "general");

        let (emails, general) =
            general.partition("emails", "general", |r| self.overrides.is_masked_email(r));
        let domain = domain.union(&emails, "domain");

        let (dropped, general) =
            general.partition("dropped", "general", |r| self.overrides.is_dropped(r));

        tracing::info!(
            domain = domain.len(),
            general = general.len(),
            dropped = dropped.len(),
            fillers = fillers.len(),
            emails = emails.len(),
            "domain split complete"
        );
        Ok(DomainSplit {
            domain,
            general,
            dropped,
            matched,
            moved_to_general: fillers.len(),
            moved_to_domain: emails.len(),
        })
    }

    /// Split by response phrases into unsuccessful, doubtful and successful.
    ///
    /// Records matching both lists are placed per the overlap policy and
    /// always reported in `ambiguous`.
    pub fn split_outcome(
        &self,
        category: Category,
        records: &RecordSet,
        unsuccessful_phrases: &PhraseList,
        doubtful_phrases: &PhraseList,
    ) -> OutcomeSplit {
        let name = |suffix: &str| format!("{category}-{suffix}");
        let unsuccessful =
            records.filter(name("unsuccessful"), |r| unsuccessful_phrases.is_match(&r.response));
        let doubtful = records.filter(name("doubtful"), |r| doubtful_phrases.is_match(&r.response));
        let ambiguous = unsuccessful.intersection(&doubtful, name("ambiguous"));
        let successful = records.difference(
            &unsuccessful.union(&doubtful, "not-successful"),
            name("successful"),
        );

        let (unsuccessful, doubtful) = match self.overlap_policy {
            OverlapPolicy::Doubtful => (
                unsuccessful.difference(&ambiguous, name("unsuccessful")),
                doubtful,
            ),
            OverlapPolicy::Unsuccessful => (
                unsuccessful,
                doubtful.difference(&ambiguous, name("doubtful")),
            ),
            OverlapPolicy::Both => (unsuccessful, doubtful),
        };

        if !ambiguous.is_empty() {
            tracing::warn!(
                category = %category,
                count = ambiguous.len(),
                policy = %self.overlap_policy,
                "records match both unsuccessful and doubtful phrases"
            );
            self.events.emit_ambiguous_records(&AmbiguousRecordsEvent {
                category: category.to_string(),
                count: ambiguous.len(),
                policy: self.overlap_policy.to_string(),
            });
        }

        OutcomeSplit {
            category,
            unsuccessful,
            doubtful,
            successful,
            ambiguous,
        }
    }
}
