//! Property tests: splits never lose or duplicate records.

use std::sync::Arc;

use proptest::prelude::*;

use logsift_core::config::OverlapPolicy;
use logsift_core::models::{Category, KeywordCorpus, Record, RecordSet};
use logsift_classify::{DomainOverrides, KeywordMatcher, Partitioner, PhraseList};
use logsift_index::MemoryBackend;

const WORDS: &[&str] = &[
    "leave", "balance", "salary", "slip", "hey", "no", "yes", "sorry", "rephrase", "attendance",
];

fn phrase() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 1..4).prop_map(|w| w.join(" "))
}

fn records() -> impl Strategy<Value = RecordSet> {
    prop::collection::vec((phrase(), phrase()), 0..24).prop_map(|pairs| {
        RecordSet::new(
            "all",
            pairs.into_iter().enumerate().map(|(i, (q, r))| {
                Record::new(format!("s{i}"), "t", "intent", "event", q, r)
            }),
        )
    })
}

fn partitioner(policy: OverlapPolicy) -> Partitioner {
    Partitioner::new(
        Arc::new(MemoryBackend::new(10_000)),
        KeywordMatcher::default(),
        DomainOverrides::new(["hey".to_string()], ["yes".to_string()], "abc@xyz.com"),
        policy,
    )
}

proptest! {
    #[test]
    fn domain_split_partitions_input(
        all in records(),
        keywords in prop::collection::vec(phrase(), 0..5),
    ) {
        let corpus = KeywordCorpus::new(keywords, 0);
        let split = partitioner(OverlapPolicy::Doubtful).split_domain(&all, &corpus).unwrap();

        prop_assert_eq!(split.domain.len() + split.general.len() + split.dropped.len(), all.len());
        let rejoined = split.domain.union(&split.general, "x").union(&split.dropped, "x");
        prop_assert!(rejoined.same_members(&all));
    }

    #[test]
    fn outcome_split_covers_input(all in records()) {
        let unsuccessful = PhraseList::new("u", ["sorry"]).unwrap();
        let doubtful = PhraseList::new("d", ["rephrase"]).unwrap();

        for policy in [OverlapPolicy::Doubtful, OverlapPolicy::Unsuccessful, OverlapPolicy::Both] {
            let split = partitioner(policy).split_outcome(Category::Domain, &all, &unsuccessful, &doubtful);
            let rejoined = split
                .successful
                .union(&split.unsuccessful, "x")
                .union(&split.doubtful, "x");
            prop_assert!(rejoined.same_members(&all));
            prop_assert!(split.successful.intersection(&split.unsuccessful, "x").is_empty());
            prop_assert!(split.successful.intersection(&split.doubtful, "x").is_empty());
            if policy != OverlapPolicy::Both {
                prop_assert!(split.unsuccessful.intersection(&split.doubtful, "x").is_empty());
            }
        }
    }
}
