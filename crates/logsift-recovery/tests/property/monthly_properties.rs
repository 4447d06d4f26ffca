//! Property tests for monthly aggregation.

use std::sync::Arc;

use proptest::prelude::*;

use logsift_core::models::{MonthlyRate, Record, RecoveryPair, YearMonth};
use logsift_recovery::{monthly_counts, monthly_series, TimestampParser};

fn pair(month: u32, day: u32, n: usize) -> RecoveryPair {
    let ts = format!("2020-{month:02}-{day:02}");
    let u = Record::new(format!("u{n}"), ts.clone(), "", "", "q", "sorry");
    let f = Record::new(format!("f{n}"), "2021-01-01", "", "", "q", "ok");
    RecoveryPair::new(Arc::new(u), Arc::new(f))
}

fn pairs() -> impl Strategy<Value = Vec<RecoveryPair>> {
    prop::collection::vec((1u32..=12, 1u32..=28), 0..30).prop_map(|v| {
        v.into_iter()
            .enumerate()
            .map(|(n, (m, d))| pair(m, d, n))
            .collect()
    })
}

proptest! {
    #[test]
    fn series_is_contiguous_and_rates_bounded(recovered in pairs(), unresolved in pairs()) {
        let parser = TimestampParser::default();
        let series = monthly_series(&recovered, &unresolved, &parser, None);

        for window in series.points.windows(2) {
            prop_assert_eq!(window[0].month.next(), window[1].month);
        }
        for point in &series.points {
            match point.rate {
                MonthlyRate::Rate(p) => {
                    prop_assert!(point.recovered + point.unresolved > 0);
                    prop_assert!((0.0..=100.0).contains(&p));
                }
                MonthlyRate::NoData => prop_assert_eq!(point.recovered + point.unresolved, 0),
            }
        }
    }

    #[test]
    fn counts_cover_every_pair(recovered in pairs(), unresolved in pairs()) {
        let parser = TimestampParser::default();
        let counts = monthly_counts(&recovered, &unresolved, &parser);
        let total: usize = counts.values().map(|(r, u)| r + u).sum();
        prop_assert_eq!(total, recovered.len() + unresolved.len());
    }

    #[test]
    fn window_fixes_series_length(recovered in pairs(), start in 1u32..=12, span in 0u32..6) {
        let parser = TimestampParser::default();
        let first = YearMonth::new(2020, start).unwrap();
        let mut last = first;
        for _ in 0..span {
            last = last.next();
        }
        let series = monthly_series(&recovered, &[], &parser, Some((first, last)));
        prop_assert_eq!(series.len(), span as usize + 1);
    }
}
