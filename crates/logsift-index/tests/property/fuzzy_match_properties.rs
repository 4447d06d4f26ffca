//! Property tests for fuzzy matching in the memory index.

use proptest::prelude::*;

use logsift_core::query::{Fuzziness, RecordField, SearchQuery};
use logsift_core::traits::SearchIndex;
use logsift_index::MemoryIndex;
use test_fixtures::{record, record_set};

proptest! {
    #[test]
    fn every_indexed_word_matches_itself(words in prop::collection::vec("[a-z]{1,9}", 1..12)) {
        let set = record_set("w", words.iter().enumerate().map(|(i, w)| record(&format!("s{i}"), "t", w, "r")));
        let index = MemoryIndex::build("w", &set, 1_000);
        for w in &words {
            let q = SearchQuery::match_all_terms(RecordField::UserInput, w.as_str(), Fuzziness::default());
            let hits = index.search(&q, 1_000).unwrap();
            prop_assert!(hits.hits.iter().any(|r| &r.user_input == w));
        }
    }

    #[test]
    fn search_is_deterministic(words in prop::collection::vec("[a-z]{3,7}", 1..20), probe in "[a-z]{3,7}") {
        let set = record_set("w", words.iter().enumerate().map(|(i, w)| record(&format!("s{i}"), "t", w, "r")));
        let index = MemoryIndex::build("w", &set, 1_000);
        let q = SearchQuery::match_all_terms(RecordField::UserInput, probe.as_str(), Fuzziness::default());
        let a = index.search(&q, 1_000).unwrap();
        let b = index.search(&q, 1_000).unwrap();
        prop_assert_eq!(a.hits, b.hits);
        prop_assert_eq!(a.total, b.total);
    }

    #[test]
    fn wider_fuzziness_never_loses_hits(words in prop::collection::vec("[a-z]{2,8}", 1..20), probe in "[a-z]{2,8}") {
        let set = record_set("w", words.iter().enumerate().map(|(i, w)| record(&format!("s{i}"), "t", w, "r")));
        let index = MemoryIndex::build("w", &set, 1_000);
        let narrow = index.search(&SearchQuery::match_all_terms(RecordField::UserInput, probe.as_str(), Fuzziness::Edits(1)), 1_000).unwrap();
        let wide = index.search(&SearchQuery::match_all_terms(RecordField::UserInput, probe.as_str(), Fuzziness::Edits(2)), 1_000).unwrap();
        prop_assert!(narrow.total <= wide.total);
    }
}

#[test]
fn auto_fuzziness_bounds() {
    let f = Fuzziness::default();
    assert_eq!(f.max_edits(2), 0);
    assert_eq!(f.max_edits(5), 1);
    assert_eq!(f.max_edits(6), 2);
}
