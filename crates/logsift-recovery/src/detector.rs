//! Recovery detection.
//!
//! For each unsuccessful record, an exact-phrase query on the query text
//! looks up later attempts in a second index. Every hit with a strictly
//! later timestamp forms a pair. Run against the successful set this
//! yields recovered pairs; run against the unsuccessful set itself it
//! yields the still-unresolved pairs.

use std::sync::Arc;

use chrono::NaiveDateTime;
use rayon::prelude::*;
use rustc_hash::FxHashSet;

use logsift_core::errors::RecoveryError;
use logsift_core::events::{
    EventDispatcher, LookupFailedEvent, MalformedTimestampEvent, ResultCapReachedEvent, Stage,
};
use logsift_core::models::{dedup_pairs, Record, RecordSet, RecoveryPair};
use logsift_core::query::{RecordField, SearchQuery};
use logsift_core::traits::{IndexBackend, SearchIndex};

use crate::timestamp::TimestampParser;

/// Pairs found by one detection pass plus degradation counts.
#[derive(Debug, Clone, Default)]
pub struct RecoveryOutcome {
    pub pairs: Vec<RecoveryPair>,
    pub queries: usize,
    pub failed_queries: usize,
    pub truncated_queries: usize,
    /// Distinct records excluded because their timestamp did not parse.
    pub malformed_timestamps: usize,
}

/// Result of the phrase lookup for one unsuccessful record.
struct Probe {
    pairs: Vec<RecoveryPair>,
    failed: bool,
    truncated: bool,
    malformed_hits: Vec<Arc<Record>>,
}

pub struct RecoveryDetector {
    backend: Arc<dyn IndexBackend>,
    parser: TimestampParser,
    pool: rayon::ThreadPool,
    events: EventDispatcher,
}

impl RecoveryDetector {
    /// `concurrency` bounds the number of phrase queries in flight.
    pub fn new(
        backend: Arc<dyn IndexBackend>,
        parser: TimestampParser,
        concurrency: usize,
    ) -> Result<Self, RecoveryError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(concurrency.max(1))
            .thread_name(|i| format!("logsift-recovery-{i}"))
            .build()
            .map_err(|e| RecoveryError::PoolUnavailable {
                reason: e.to_string(),
            })?;
        Ok(Self {
            backend,
            parser,
            pool,
            events: EventDispatcher::new(),
        })
    }

    pub fn with_events(mut self, events: EventDispatcher) -> Self {
        self.events = events;
        self
    }

    pub fn parser(&self) -> &TimestampParser {
        &self.parser
    }

    /// Pairs of unsuccessful records with later successful attempts.
    pub fn detect(
        &self,
        unsuccessful: &RecordSet,
        successful: &RecordSet,
    ) -> Result<RecoveryOutcome, RecoveryError> {
        let index = self.open(successful)?;
        Ok(self.detect_in(unsuccessful, index.as_ref()))
    }

    /// Pairs of unsuccessful records with later attempts that also failed.
    ///
    /// Every record this pass sees was already parsed by [`Self::detect`]
    /// over the same set, so malformed timestamps are counted here but not
    /// logged or emitted a second time.
    pub fn detect_unresolved(
        &self,
        unsuccessful: &RecordSet,
    ) -> Result<RecoveryOutcome, RecoveryError> {
        let index = self.open(unsuccessful)?;
        Ok(self.run_pass(unsuccessful, index.as_ref(), false))
    }

    /// Detection against an already open index of later attempts.
    pub fn detect_in(&self, unsuccessful: &RecordSet, later: &dyn SearchIndex) -> RecoveryOutcome {
        self.run_pass(unsuccessful, later, true)
    }

    fn run_pass(
        &self,
        unsuccessful: &RecordSet,
        later: &dyn SearchIndex,
        report_malformed: bool,
    ) -> RecoveryOutcome {
        let mut outcome = RecoveryOutcome::default();

        let mut candidates: Vec<(&Arc<Record>, NaiveDateTime)> = Vec::with_capacity(unsuccessful.len());
        let mut malformed: FxHashSet<Arc<Record>> = FxHashSet::default();
        for record in unsuccessful {
            match self.parser.parse(&record.timestamp) {
                Some(at) => candidates.push((record, at)),
                None => {
                    if malformed.insert(Arc::clone(record)) && report_malformed {
                        self.report_malformed(record);
                    }
                }
            }
        }

        let probes: Vec<Probe> = self.pool.install(|| {
            candidates
                .par_iter()
                .map(|(record, at)| self.probe(record, *at, later))
                .collect()
        });

        outcome.queries = probes.len();
        let mut pairs = Vec::new();
        for probe in probes {
            outcome.failed_queries += usize::from(probe.failed);
            outcome.truncated_queries += usize::from(probe.truncated);
            for hit in probe.malformed_hits {
                if malformed.insert(Arc::clone(&hit)) && report_malformed {
                    self.report_malformed(&hit);
                }
            }
            pairs.extend(probe.pairs);
        }
        outcome.pairs = dedup_pairs(pairs);
        outcome.malformed_timestamps = malformed.len();

        tracing::info!(
            index = later.name(),
            unsuccessful = unsuccessful.len(),
            pairs = outcome.pairs.len(),
            failed = outcome.failed_queries,
            truncated = outcome.truncated_queries,
            malformed = outcome.malformed_timestamps,
            "recovery pass complete"
        );
        outcome
    }

    fn probe(&self, record: &Arc<Record>, at: NaiveDateTime, later: &dyn SearchIndex) -> Probe {
        let mut probe = Probe {
            pairs: Vec::new(),
            failed: false,
            truncated: false,
            malformed_hits: Vec::new(),
        };
        let query = SearchQuery::phrase(RecordField::UserInput, record.user_input.as_str());
        let hits = match later.search(&query, later.max_results()) {
            Ok(hits) => hits,
            Err(e) => {
                tracing::warn!(index = later.name(), error = %e, "phrase lookup failed");
                self.events.emit_lookup_failed(&LookupFailedEvent {
                    stage: Stage::Recovery,
                    subject: record.user_input.clone(),
                    reason: e.to_string(),
                });
                probe.failed = true;
                return probe;
            }
        };

        if hits.truncated() {
            tracing::warn!(
                index = later.name(),
                returned = hits.hits.len(),
                total = hits.total,
                "phrase lookup hit the result cap, pairs may be incomplete"
            );
            self.events.emit_result_cap_reached(&ResultCapReachedEvent {
                stage: Stage::Recovery,
                index: later.name().to_string(),
                returned: hits.hits.len(),
                total: hits.total,
            });
            probe.truncated = true;
        }

        for hit in hits.hits {
            match self.parser.parse(&hit.timestamp) {
                Some(hit_at) if hit_at > at => {
                    probe.pairs.push(RecoveryPair::new(Arc::clone(record), hit));
                }
                Some(_) => {}
                None => probe.malformed_hits.push(hit),
            }
        }
        probe
    }

    fn open(&self, set: &RecordSet) -> Result<Arc<dyn SearchIndex>, RecoveryError> {
        self.backend
            .open(set.name(), set)
            .map_err(|source| RecoveryError::IndexUnavailable {
                set: set.name().to_string(),
                source,
            })
    }

    fn report_malformed(&self, record: &Record) {
        tracing::warn!(
            session_id = %record.session_id,
            timestamp = %record.timestamp,
            "unparsable timestamp, record excluded from recovery"
        );
        self.events.emit_malformed_timestamp(&MalformedTimestampEvent {
            session_id: record.session_id.clone(),
            timestamp: record.timestamp.clone(),
        });
    }
}
