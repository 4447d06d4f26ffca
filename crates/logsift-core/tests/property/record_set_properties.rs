//! Property tests for RecordSet algebra.

use proptest::prelude::*;

use logsift_core::{Record, RecordSet};

fn arb_record() -> impl Strategy<Value = Record> {
    // Small alphabets so duplicates are common.
    (0u8..4, 0u8..3, prop::sample::select(vec!["leave balance", "hey", "no", "salary slip"]), 0u8..2)
        .prop_map(|(session, ts, query, resp)| {
            Record::new(
                format!("s{session}"),
                format!("2020-01-{:02} 10:00:00", ts + 1),
                "",
                "",
                query,
                if resp == 0 { "Sorry" } else { "Here it is" },
            )
        })
}

fn arb_records() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(arb_record(), 0..40)
}

proptest! {
    #[test]
    fn construction_removes_every_duplicate(records in arb_records()) {
        let set = RecordSet::new("all", records.clone());
        let mut distinct = records.clone();
        distinct.sort();
        distinct.dedup();
        prop_assert_eq!(set.len(), distinct.len());
        for r in &records {
            prop_assert!(set.contains(r));
        }
    }

    #[test]
    fn partition_is_complementary(records in arb_records()) {
        let all = RecordSet::new("all", records);
        let (hits, rest) = all.partition("hits", "rest", |r| r.response.starts_with("Sorry"));
        prop_assert!(hits.intersection(&rest, "overlap").is_empty());
        prop_assert!(hits.union(&rest, "joined").same_members(&all));
    }

    #[test]
    fn difference_then_union_restores_parent(a in arb_records(), b in arb_records()) {
        let parent = RecordSet::new("parent", a);
        let other = RecordSet::new("other", b);
        let inside = parent.intersection(&other, "inside");
        let outside = parent.difference(&other, "outside");
        prop_assert!(inside.intersection(&outside, "x").is_empty());
        prop_assert!(inside.union(&outside, "back").same_members(&parent));
    }

    #[test]
    fn union_is_idempotent(records in arb_records()) {
        let set = RecordSet::new("s", records);
        let twice = set.union(&set, "twice");
        prop_assert_eq!(twice.as_slice(), set.as_slice());
    }
}

#[test]
fn first_occurrence_order_is_kept() {
    let a = Record::new("s1", "t1", "", "", "a", "r");
    let b = Record::new("s1", "t2", "", "", "b", "r");
    let set = RecordSet::new("s", vec![b.clone(), a.clone(), b.clone()]);
    let order: Vec<_> = set.iter().map(|r| r.user_input.as_str()).collect();
    assert_eq!(order, vec!["b", "a"]);
}
