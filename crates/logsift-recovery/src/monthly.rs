//! Monthly recovery-rate aggregation.
//!
//! Pairs are grouped by the calendar month of their unsuccessful record.
//! Rate per month is `recovered / (recovered + unresolved) * 100`.

use std::collections::BTreeMap;

use logsift_core::models::{MonthlyRecoverySeries, RecoveryPair, YearMonth};

use crate::timestamp::TimestampParser;

/// Per-month `(recovered, unresolved)` counts. Pairs whose unsuccessful
/// timestamp does not parse are skipped.
pub fn monthly_counts(
    recovered: &[RecoveryPair],
    unresolved: &[RecoveryPair],
    parser: &TimestampParser,
) -> BTreeMap<YearMonth, (usize, usize)> {
    let mut counts: BTreeMap<YearMonth, (usize, usize)> = BTreeMap::new();
    let month_of = |pair: &RecoveryPair| parser.parse(&pair.unsuccessful.timestamp).map(YearMonth::of);

    for month in recovered.iter().filter_map(month_of) {
        counts.entry(month).or_default().0 += 1;
    }
    for month in unresolved.iter().filter_map(month_of) {
        counts.entry(month).or_default().1 += 1;
    }
    counts
}

/// Contiguous monthly series; see [`MonthlyRecoverySeries::from_counts`]
/// for how `window` bounds it.
pub fn monthly_series(
    recovered: &[RecoveryPair],
    unresolved: &[RecoveryPair],
    parser: &TimestampParser,
    window: Option<(YearMonth, YearMonth)>,
) -> MonthlyRecoverySeries {
    MonthlyRecoverySeries::from_counts(&monthly_counts(recovered, unresolved, parser), window)
}
