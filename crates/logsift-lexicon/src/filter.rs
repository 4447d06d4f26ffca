//! Concurrent legitimacy filter.
//!
//! The record population is split into `workers` equal chunks. Each chunk
//! runs on its own scoped thread with a private result accumulator and a
//! private lookup cache; results are concatenated after every worker has
//! finished. A lookup that fails or exceeds the timeout counts as an
//! invalid token and is never retried.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rustc_hash::FxHashMap;

use logsift_core::constants::{DEFAULT_LEGITIMACY_WORKERS, DEFAULT_LOOKUP_TIMEOUT_MS};
use logsift_core::events::{EventDispatcher, LookupFailedEvent, Stage};
use logsift_core::models::{Record, RecordSet};
use logsift_core::text::word_tokens;
use logsift_core::traits::LexiconPredicate;

use crate::timed_caller::{Lookup, TimedCaller};

/// Kept and discarded records plus lookup failure counts.
#[derive(Debug, Clone)]
pub struct LegitimacyOutcome {
    pub kept: RecordSet,
    /// Complement of `kept`, retained for audit.
    pub discarded: RecordSet,
    pub lookups: usize,
    pub failed_lookups: usize,
    pub timed_out_lookups: usize,
}

#[derive(Default)]
struct ChunkOutcome {
    kept: Vec<Arc<Record>>,
    discarded: Vec<Arc<Record>>,
    lookups: usize,
    failed: usize,
    timed_out: usize,
}

#[derive(Debug, Clone)]
pub struct LegitimacyFilter {
    workers: usize,
    timeout: Duration,
    events: EventDispatcher,
}

impl Default for LegitimacyFilter {
    fn default() -> Self {
        Self::new(
            DEFAULT_LEGITIMACY_WORKERS,
            Duration::from_millis(DEFAULT_LOOKUP_TIMEOUT_MS),
        )
    }
}

impl LegitimacyFilter {
    /// `workers` is clamped to at least 1.
    pub fn new(workers: usize, timeout: Duration) -> Self {
        Self {
            workers: workers.max(1),
            timeout,
            events: EventDispatcher::new(),
        }
    }

    pub fn with_events(mut self, events: EventDispatcher) -> Self {
        self.events = events;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Keep records whose `user_input` has at least one valid token.
    pub fn filter(
        &self,
        records: &RecordSet,
        predicate: Arc<dyn LexiconPredicate>,
    ) -> LegitimacyOutcome {
        let all = records.as_slice();
        let chunk_size = all.len().div_ceil(self.workers).max(1);

        let outcomes: Vec<ChunkOutcome> = thread::scope(|scope| {
            let handles: Vec<_> = all
                .chunks(chunk_size)
                .map(|chunk| {
                    let predicate = Arc::clone(&predicate);
                    let handle = scope.spawn(move || self.check_chunk(chunk, predicate));
                    (chunk, handle)
                })
                .collect();

            handles
                .into_iter()
                .map(|(chunk, handle)| {
                    handle.join().unwrap_or_else(|_| {
                        tracing::error!(
                            records = chunk.len(),
                            "legitimacy worker panicked; discarding its chunk"
                        );
                        ChunkOutcome {
                            discarded: chunk.to_vec(),
                            ..ChunkOutcome::default()
                        }
                    })
                })
                .collect()
        });

        let mut kept = Vec::with_capacity(all.len());
        let mut discarded = Vec::new();
        let (mut lookups, mut failed, mut timed_out) = (0, 0, 0);
        for outcome in outcomes {
            kept.extend(outcome.kept);
            discarded.extend(outcome.discarded);
            lookups += outcome.lookups;
            failed += outcome.failed;
            timed_out += outcome.timed_out;
        }

        if failed + timed_out > 0 {
            tracing::warn!(
                failed,
                timed_out,
                "lexicon lookups degraded; affected tokens counted as invalid"
            );
        }

        LegitimacyOutcome {
            kept: RecordSet::from_shared(format!("{}-legitimate", records.name()), kept),
            discarded: RecordSet::from_shared(format!("{}-discarded", records.name()), discarded),
            lookups,
            failed_lookups: failed,
            timed_out_lookups: timed_out,
        }
    }

    fn check_chunk(&self, chunk: &[Arc<Record>], predicate: Arc<dyn LexiconPredicate>) -> ChunkOutcome {
        let mut caller = TimedCaller::new(predicate, self.timeout);
        let mut cache: FxHashMap<String, bool> = FxHashMap::default();
        let mut out = ChunkOutcome::default();

        for record in chunk {
            let mut legitimate = false;
            for token in word_tokens(&record.user_input) {
                let token = token.to_lowercase();
                let valid = match cache.get(&token) {
                    Some(&v) => v,
                    None => {
                        let v = self.lookup(&mut caller, &token, &mut out);
                        cache.insert(token, v);
                        v
                    }
                };
                if valid {
                    legitimate = true;
                    break;
                }
            }
            if legitimate {
                out.kept.push(Arc::clone(record));
            } else {
                out.discarded.push(Arc::clone(record));
            }
        }
        out
    }

    fn lookup(&self, caller: &mut TimedCaller, token: &str, out: &mut ChunkOutcome) -> bool {
        out.lookups += 1;
        let reason = match caller.call(token) {
            Lookup::Valid => return true,
            Lookup::Invalid => return false,
            Lookup::Failed(e) => {
                out.failed += 1;
                e.to_string()
            }
            Lookup::TimedOut => {
                out.timed_out += 1;
                format!("timed out after {}ms", self.timeout.as_millis())
            }
        };
        tracing::debug!(token, %reason, "lexicon lookup failed");
        self.events.emit_lookup_failed(&LookupFailedEvent {
            stage: Stage::Legitimacy,
            subject: token.to_string(),
            reason,
        });
        false
    }
}
