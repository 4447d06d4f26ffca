//! Domain/general and outcome splits over the in-process index.

use std::sync::Arc;

use logsift_core::config::OverlapPolicy;
use logsift_core::errors::{ClassifyError, IndexError};
use logsift_core::events::{AmbiguousRecordsEvent, EventDispatcher, PipelineEventHandler};
use logsift_core::models::{Category, KeywordCorpus, RecordSet};
use logsift_core::traits::{IndexBackend, SearchIndex};
use logsift_classify::{DomainOverrides, KeywordMatcher, Partitioner, PhraseList};
use logsift_index::MemoryBackend;
use test_fixtures::{queries, record, record_set};

fn corpus(keywords: &[&str]) -> KeywordCorpus {
    KeywordCorpus::new(keywords.iter().map(|k| k.to_string()), keywords.len())
}

fn partitioner(policy: OverlapPolicy) -> Partitioner {
    Partitioner::new(
        Arc::new(MemoryBackend::new(1_000)),
        KeywordMatcher::default(),
        DomainOverrides::new(
            ["no", "hey", "nope"].map(String::from),
            ["yes", "no"].map(String::from),
            "abc@xyz.com",
        ),
        policy,
    )
}

fn logs() -> RecordSet {
    record_set(
        "all",
        vec![
            record("s1", "t1", "leave balance", "Your leave balance is 4"),
            record("s2", "t2", "how to mark attendence", "Use the AEBAS device"),
            record("s3", "t3", "hey", "Hello! How can I help?"),
            record("s4", "t4", "what is the weather", "Sorry, I did not get that"),
            record("s5", "t5", "send to abc@xyz.com", "Mail sent"),
            record("s6", "t6", "yes", "Okay"),
        ],
    )
}

#[test]
fn keyword_match_splits_domain_from_general() {
    let split = partitioner(OverlapPolicy::Doubtful)
        .split_domain(&logs(), &corpus(&["leave balance", "attendance"]))
        .unwrap();

    assert_eq!(
        queries(&split.domain),
        vec!["how to mark attendence", "leave balance", "send to abc@xyz.com"]
    );
    assert_eq!(queries(&split.general), vec!["hey", "what is the weather"]);
    assert_eq!(queries(&split.dropped), vec!["yes"]);
    assert_eq!(split.moved_to_domain, 1);
}

#[test]
fn split_is_a_partition_of_the_input() {
    let all = logs();
    let split = partitioner(OverlapPolicy::Doubtful)
        .split_domain(&all, &corpus(&["leave balance", "hey", "weather"]))
        .unwrap();

    assert_eq!(split.domain.len() + split.general.len() + split.dropped.len(), all.len());
    assert!(split.domain.intersection(&split.general, "x").is_empty());
    assert!(split.domain.intersection(&split.dropped, "x").is_empty());
    assert!(split.general.intersection(&split.dropped, "x").is_empty());
}

#[test]
fn filler_query_moves_to_general_and_stays_there() {
    let p = partitioner(OverlapPolicy::Doubtful);
    let keywords = corpus(&["hey", "leave balance"]);

    let first = p.split_domain(&logs(), &keywords).unwrap();
    assert!(queries(&first.general).contains(&"hey".to_string()));
    assert!(!queries(&first.domain).contains(&"hey".to_string()));
    assert_eq!(first.moved_to_general, 1);

    // Re-running on the relocated output changes nothing.
    let rejoined = first.domain.union(&first.general, "all");
    let second = p.split_domain(&rejoined, &keywords).unwrap();
    assert!(second.domain.same_members(&first.domain));
    assert!(second.general.same_members(&first.general));
    assert!(second.dropped.is_empty());
}

#[test]
fn empty_corpus_puts_everything_in_general() {
    let all = record_set(
        "all",
        vec![
            record("s1", "t1", "leave balance", "ok"),
            record("s2", "t2", "salary slip", "ok"),
        ],
    );
    let split = partitioner(OverlapPolicy::Doubtful)
        .split_domain(&all, &corpus(&[]))
        .unwrap();
    assert!(split.domain.is_empty());
    assert_eq!(split.general.len(), 2);
    assert_eq!(split.matched.queries, 0);
}

struct BrokenBackend;

impl IndexBackend for BrokenBackend {
    fn kind(&self) -> &'static str {
        "broken"
    }

    fn open(&self, name: &str, _records: &RecordSet) -> Result<Arc<dyn SearchIndex>, IndexError> {
        Err(IndexError::Unreachable {
            index: name.to_string(),
            reason: "connection refused".to_string(),
        })
    }
}

#[test]
fn unavailable_backend_is_an_error() {
    let p = Partitioner::new(
        Arc::new(BrokenBackend),
        KeywordMatcher::default(),
        DomainOverrides::new(Vec::new(), Vec::new(), "abc@xyz.com"),
        OverlapPolicy::Doubtful,
    );
    let err = p.split_domain(&logs(), &corpus(&["leave"])).unwrap_err();
    assert!(matches!(err, ClassifyError::IndexUnavailable { .. }));
}

fn outcome_input() -> RecordSet {
    record_set(
        "domain",
        vec![
            record("s1", "t1", "leave balance", "Your leave balance is 4"),
            record("s2", "t2", "salary slip", "Sorry, I did not get that"),
            record("s3", "t3", "attendance", "Could you please rephrase?"),
            record("s4", "t4", "holiday list", "Sorry, could you please rephrase?"),
        ],
    )
}

fn phrase_lists() -> (PhraseList, PhraseList) {
    (
        PhraseList::new("unsuccessful", ["sorry"]).unwrap(),
        PhraseList::new("doubtful", ["please rephrase"]).unwrap(),
    )
}

#[test]
fn outcome_split_by_response_phrases() {
    let (unsuccessful, doubtful) = phrase_lists();
    let split = partitioner(OverlapPolicy::Doubtful).split_outcome(
        Category::Domain,
        &outcome_input(),
        &unsuccessful,
        &doubtful,
    );

    assert_eq!(split.category, Category::Domain);
    assert_eq!(queries(&split.successful), vec!["leave balance"]);
    assert_eq!(queries(&split.unsuccessful), vec!["salary slip"]);
    assert_eq!(queries(&split.doubtful), vec!["attendance", "holiday list"]);
    assert_eq!(queries(&split.ambiguous), vec!["holiday list"]);
}

#[test]
fn overlap_policy_decides_where_ambiguous_records_go() {
    let (unsuccessful, doubtful) = phrase_lists();
    let input = outcome_input();

    let split = partitioner(OverlapPolicy::Unsuccessful).split_outcome(
        Category::General,
        &input,
        &unsuccessful,
        &doubtful,
    );
    assert_eq!(queries(&split.unsuccessful), vec!["holiday list", "salary slip"]);
    assert_eq!(queries(&split.doubtful), vec!["attendance"]);

    let split = partitioner(OverlapPolicy::Both).split_outcome(
        Category::General,
        &input,
        &unsuccessful,
        &doubtful,
    );
    assert!(split.unsuccessful.contains(&split.ambiguous.as_slice()[0]));
    assert!(split.doubtful.contains(&split.ambiguous.as_slice()[0]));
    assert!(split.successful.intersection(&split.ambiguous, "x").is_empty());
}

#[derive(Default)]
struct AmbiguityCounter(std::sync::Mutex<Vec<usize>>);

impl PipelineEventHandler for AmbiguityCounter {
    fn on_ambiguous_records(&self, event: &AmbiguousRecordsEvent) {
        self.0.lock().unwrap().push(event.count);
    }
}

#[test]
fn ambiguous_records_are_reported() {
    let counter = Arc::new(AmbiguityCounter::default());
    let mut events = EventDispatcher::new();
    events.register(counter.clone());

    let (unsuccessful, doubtful) = phrase_lists();
    partitioner(OverlapPolicy::Doubtful)
        .with_events(events)
        .split_outcome(Category::Domain, &outcome_input(), &unsuccessful, &doubtful);

    assert_eq!(*counter.0.lock().unwrap(), vec![1]);
}
