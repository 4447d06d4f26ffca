//! Tests for the concurrent legitimacy filter.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use logsift_core::errors::LexiconError;
use logsift_core::events::{EventDispatcher, LookupFailedEvent, PipelineEventHandler};
use logsift_core::traits::LexiconPredicate;
use logsift_lexicon::{LegitimacyFilter, WordListLexicon};
use test_fixtures::{queries, record, record_set};

fn words(list: &[&str]) -> Arc<dyn LexiconPredicate> {
    Arc::new(WordListLexicon::from_words(list.iter().copied()))
}

fn sample() -> logsift_core::RecordSet {
    record_set(
        "logs",
        vec![
            record("s1", "t1", "leave balance?", "ok"),
            record("s2", "t2", "asdf qwzx", "sorry"),
            record("s3", "t3", "", "sorry"),
            record("s4", "t4", "zzz-Attendance!", "ok"),
            record("s5", "t5", "123", "sorry"),
        ],
    )
}

#[test]
fn keeps_records_with_one_valid_token() {
    let filter = LegitimacyFilter::new(2, Duration::from_secs(1));
    let out = filter.filter(&sample(), words(&["leave", "attendance"]));
    assert_eq!(queries(&out.kept), vec!["leave balance?", "zzz-Attendance!"]);
    assert_eq!(queries(&out.discarded), vec!["", "123", "asdf qwzx"]);
    assert_eq!(out.failed_lookups, 0);
}

#[test]
fn output_is_complete_for_any_worker_count() {
    let input = sample();
    for workers in [1, 2, 3, 8, 32] {
        let out = LegitimacyFilter::new(workers, Duration::from_secs(1))
            .filter(&input, words(&["leave"]));
        assert_eq!(out.kept.len() + out.discarded.len(), input.len(), "workers={workers}");
        assert!(out.kept.union(&out.discarded, "all").same_members(&input));
    }
}

#[test]
fn failed_lookups_count_as_invalid() {
    let failing: Arc<dyn LexiconPredicate> = Arc::new(|token: &str| -> Result<bool, LexiconError> {
        Err(LexiconError::RequestFailed {
            token: token.to_string(),
            reason: "unreachable".into(),
        })
    });
    let out = LegitimacyFilter::new(3, Duration::from_secs(1)).filter(&sample(), failing);
    assert!(out.kept.is_empty());
    assert_eq!(out.discarded.len(), 5);
    assert!(out.failed_lookups > 0);
    assert_eq!(out.failed_lookups, out.lookups);
}

#[test]
fn slow_lookups_time_out_and_count_as_invalid() {
    let slow: Arc<dyn LexiconPredicate> = Arc::new(|token: &str| -> Result<bool, LexiconError> {
        if token == "leave" {
            std::thread::sleep(Duration::from_millis(300));
        }
        Ok(true)
    });
    let input = record_set(
        "logs",
        vec![
            record("s1", "t1", "leave", "ok"),
            record("s2", "t2", "balance", "ok"),
        ],
    );
    let out = LegitimacyFilter::new(1, Duration::from_millis(30)).filter(&input, slow);
    assert_eq!(out.timed_out_lookups, 1);
    // The helper thread was replaced after the timeout, so the next lookup still works.
    assert_eq!(queries(&out.kept), vec!["balance"]);
    assert_eq!(queries(&out.discarded), vec!["leave"]);
}

#[test]
fn repeated_tokens_are_looked_up_once_per_worker() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let predicate: Arc<dyn LexiconPredicate> = Arc::new(move |_: &str| -> Result<bool, LexiconError> {
        counter.fetch_add(1, Ordering::Relaxed);
        Ok(false)
    });
    let input = record_set(
        "logs",
        (0..20).map(|i| record(&format!("s{i}"), "t", "hello hello", "ok")),
    );
    let out = LegitimacyFilter::new(1, Duration::from_secs(1)).filter(&input, predicate);
    assert_eq!(calls.load(Ordering::Relaxed), 1);
    assert_eq!(out.discarded.len(), 20);
}

#[test]
fn lookup_failures_are_dispatched() {
    #[derive(Default)]
    struct Failures(AtomicUsize);
    impl PipelineEventHandler for Failures {
        fn on_lookup_failed(&self, _event: &LookupFailedEvent) {
            self.0.fetch_add(1, Ordering::Relaxed);
        }
    }

    let failures = Arc::new(Failures::default());
    let mut events = EventDispatcher::new();
    events.register(failures.clone());

    let failing: Arc<dyn LexiconPredicate> = Arc::new(|token: &str| -> Result<bool, LexiconError> {
        Err(LexiconError::MalformedResponse {
            token: token.into(),
            reason: "html".into(),
        })
    });
    let out = LegitimacyFilter::new(2, Duration::from_secs(1))
        .with_events(events)
        .filter(&sample(), failing);
    assert_eq!(failures.0.load(Ordering::Relaxed), out.failed_lookups);
}

#[test]
fn empty_input_yields_empty_outputs() {
    let out = LegitimacyFilter::default().filter(&record_set("none", vec![]), words(&["x"]));
    assert!(out.kept.is_empty());
    assert!(out.discarded.is_empty());
    assert_eq!(out.lookups, 0);
}

#[test]
fn word_list_loads_from_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("words.txt");
    std::fs::write(&path, "Leave\n\n  balance \n").unwrap();
    let lexicon = WordListLexicon::load(&path).unwrap();
    assert_eq!(lexicon.len(), 2);
    assert!(lexicon.is_valid("LEAVE").unwrap());
    assert!(!lexicon.is_valid("slip").unwrap());

    let missing = WordListLexicon::load(&dir.path().join("absent.txt")).unwrap_err();
    assert!(matches!(missing, LexiconError::WordListUnavailable { .. }));
}
