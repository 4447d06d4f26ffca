//! Property tests for legitimacy filter completeness.

use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;

use logsift_core::errors::LexiconError;
use logsift_core::traits::LexiconPredicate;
use logsift_lexicon::LegitimacyFilter;
use test_fixtures::{record, record_set};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn kept_and_discarded_partition_the_input(
        queries in prop::collection::vec("[a-z ]{0,12}", 0..30),
        workers in 1usize..10,
    ) {
        let input = record_set(
            "logs",
            queries.iter().enumerate().map(|(i, q)| record(&format!("s{i}"), "t", q, "r")),
        );
        // Tokens with an even length are legitimate; odd-length ones fail.
        let predicate: Arc<dyn LexiconPredicate> = Arc::new(|t: &str| -> Result<bool, LexiconError> {
            if t.len() % 2 == 0 {
                Ok(true)
            } else {
                Err(LexiconError::RequestFailed { token: t.into(), reason: "odd".into() })
            }
        });
        let out = LegitimacyFilter::new(workers, Duration::from_secs(5)).filter(&input, predicate);

        prop_assert!(out.kept.intersection(&out.discarded, "x").is_empty());
        prop_assert!(out.kept.union(&out.discarded, "all").same_members(&input));
        for r in out.kept.iter() {
            prop_assert!(r.user_input.split_whitespace().any(|t| t.len() % 2 == 0));
        }
    }
}
