use std::sync::Arc;

use rustc_hash::FxHashSet;

use super::{Record, RecordSet};

/// An unsuccessful record paired with a later record carrying the same query.
///
/// In the recovered set `followup` was answered successfully; in the
/// still-unresolved set it was another unsuccessful attempt. Equality covers
/// both records in full.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecoveryPair {
    pub unsuccessful: Arc<Record>,
    pub followup: Arc<Record>,
}

impl RecoveryPair {
    pub fn new(unsuccessful: Arc<Record>, followup: Arc<Record>) -> Self {
        Self {
            unsuccessful,
            followup,
        }
    }
}

/// Drop duplicate pairs, keeping first-occurrence order.
pub fn dedup_pairs(pairs: impl IntoIterator<Item = RecoveryPair>) -> Vec<RecoveryPair> {
    let mut seen = FxHashSet::default();
    pairs
        .into_iter()
        .filter(|p| seen.insert(p.clone()))
        .collect()
}

/// Pairs whose unsuccessful record is a member of `set`, in input order.
pub fn pairs_within(pairs: &[RecoveryPair], set: &RecordSet) -> Vec<RecoveryPair> {
    let members: FxHashSet<&Record> = set.iter().map(|r| r.as_ref()).collect();
    pairs
        .iter()
        .filter(|p| members.contains(p.unsuccessful.as_ref()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(session: &str, query: &str) -> Arc<Record> {
        Arc::new(Record {
            session_id: session.to_string(),
            timestamp: "2020-03-01".to_string(),
            user_input: query.to_string(),
            ..Record::default()
        })
    }

    #[test]
    fn pairs_within_keeps_members_in_order() {
        let (a, b, c) = (record("a", "leave"), record("b", "salary"), record("c", "leave"));
        let pairs = vec![
            RecoveryPair::new(Arc::clone(&b), Arc::clone(&c)),
            RecoveryPair::new(Arc::clone(&a), Arc::clone(&c)),
            RecoveryPair::new(Arc::clone(&c), Arc::clone(&a)),
        ];
        let set = RecordSet::from_shared("filtered", [record("c", "leave"), Arc::clone(&b)]);

        let kept = pairs_within(&pairs, &set);
        assert_eq!(kept, vec![pairs[0].clone(), pairs[2].clone()]);
        assert!(pairs_within(&pairs, &RecordSet::empty("none")).is_empty());
    }
}
