//! Property tests: repeated matcher runs agree, batched or not.

use proptest::prelude::*;

use logsift_classify::{KeywordMatcher, MatchOutcome};
use logsift_core::events::Stage;
use logsift_core::models::{KeywordCorpus, Record, RecordSet};
use logsift_core::query::{Fuzziness, MatchMode, RecordField};
use logsift_index::MemoryIndex;

const WORDS: &[&str] = &[
    "leave", "levae", "balance", "salary", "slip", "attendance", "holiday", "list", "pls",
];

fn phrase() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 1..4).prop_map(|w| w.join(" "))
}

/// Records with every row repeated, so construction has duplicates to drop.
fn records() -> impl Strategy<Value = RecordSet> {
    prop::collection::vec((phrase(), phrase()), 0..16).prop_map(|rows| {
        let once: Vec<Record> = rows
            .into_iter()
            .enumerate()
            .map(|(i, (q, r))| Record::new(format!("s{i}"), "t", "intent", "event", q, r))
            .collect();
        RecordSet::new("all", once.iter().cloned().chain(once.iter().cloned()))
    })
}

fn run(matcher: &KeywordMatcher, records: &RecordSet, corpus: &KeywordCorpus, mode: MatchMode) -> MatchOutcome {
    let index = MemoryIndex::build(records.name(), records, 10_000);
    matcher.run(
        &index,
        records,
        corpus,
        &[RecordField::UserInput],
        mode,
        "matched",
        Stage::DomainSplit,
    )
}

proptest! {
    #[test]
    fn matcher_runs_are_repeatable(
        all in records(),
        keywords in prop::collection::vec(phrase(), 0..6),
    ) {
        let corpus = KeywordCorpus::new(keywords, 0);
        for matcher in [KeywordMatcher::default(), KeywordMatcher::new(Fuzziness::default(), 1)] {
            for mode in [MatchMode::AnyOf, MatchMode::NoneOf] {
                let a = run(&matcher, &all, &corpus, mode);
                let b = run(&matcher, &all, &corpus, mode);
                prop_assert_eq!(a.matched.as_slice(), b.matched.as_slice());

                let distinct = RecordSet::from_shared("distinct", a.matched.iter().cloned());
                prop_assert_eq!(distinct.len(), a.matched.len());
            }
        }
    }
}
