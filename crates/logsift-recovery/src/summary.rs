//! Distinct recovered and still-unresolved queries.

use std::collections::BTreeSet;

use serde::Serialize;

use logsift_core::models::RecoveryPair;
use logsift_core::text::normalize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecoverySummary {
    pub recovered_queries: usize,
    pub unresolved_queries: usize,
    pub recovered: Vec<String>,
    pub unresolved: Vec<String>,
}

impl RecoverySummary {
    /// Queries are compared after normalisation and listed sorted.
    pub fn from_pairs(recovered: &[RecoveryPair], unresolved: &[RecoveryPair]) -> Self {
        let distinct = |pairs: &[RecoveryPair]| -> Vec<String> {
            pairs
                .iter()
                .map(|p| normalize(&p.followup.user_input))
                .filter(|q| !q.is_empty())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        };
        let recovered = distinct(recovered);
        let unresolved = distinct(unresolved);
        Self {
            recovered_queries: recovered.len(),
            unresolved_queries: unresolved.len(),
            recovered,
            unresolved,
        }
    }
}
