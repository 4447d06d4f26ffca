//! Monthly recovery-rate series.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    /// 1..=12
    pub month: u32,
}

impl YearMonth {
    /// Returns `None` when `month` is outside 1..=12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn of_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn of(instant: NaiveDateTime) -> Self {
        Self::of_date(instant.date())
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// `Mon-YYYY`, e.g. `Mar-2020`.
    pub fn label(self) -> String {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(d) => d.format("%b-%Y").to_string(),
            None => format!("{:02}-{}", self.month, self.year),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

/// Recovery rate for one month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MonthlyRate {
    /// Percentage in 0.0..=100.0.
    Rate(f64),
    /// No recovered and no unresolved pairs that month.
    NoData,
}

impl MonthlyRate {
    pub fn from_counts(recovered: usize, unresolved: usize) -> Self {
        let total = recovered + unresolved;
        if total == 0 {
            Self::NoData
        } else {
            Self::Rate(recovered as f64 / total as f64 * 100.0)
        }
    }

    pub fn percent(self) -> Option<f64> {
        match self {
            Self::Rate(p) => Some(p),
            Self::NoData => None,
        }
    }
}

impl fmt::Display for MonthlyRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rate(p) => write!(f, "{p:.2}"),
            Self::NoData => f.write_str("no data"),
        }
    }
}

impl Serialize for MonthlyRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Rate(p) => serializer.serialize_f64(*p),
            Self::NoData => serializer.serialize_str("no data"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRecoveryPoint {
    pub month: YearMonth,
    pub recovered: usize,
    pub unresolved: usize,
    pub rate: MonthlyRate,
}

/// One point per calendar month, contiguous, in chronological order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonthlyRecoverySeries {
    pub points: Vec<MonthlyRecoveryPoint>,
}

impl MonthlyRecoverySeries {
    /// Build a contiguous series from per-month `(recovered, unresolved)` counts.
    ///
    /// With a `window`, every month in `start..=end` is present and counts
    /// outside it are ignored. Without one, the series spans the earliest to
    /// the latest month in `counts`.
    pub fn from_counts(
        counts: &BTreeMap<YearMonth, (usize, usize)>,
        window: Option<(YearMonth, YearMonth)>,
    ) -> Self {
        let bounds = window.or_else(|| {
            let first = counts.keys().next()?;
            let last = counts.keys().next_back()?;
            Some((*first, *last))
        });
        let Some((start, end)) = bounds else {
            return Self::default();
        };

        let mut points = Vec::new();
        let mut month = start;
        while month <= end {
            let (recovered, unresolved) = counts.get(&month).copied().unwrap_or((0, 0));
            points.push(MonthlyRecoveryPoint {
                month,
                recovered,
                unresolved,
                rate: MonthlyRate::from_counts(recovered, unresolved),
            });
            month = month.next();
        }
        Self { points }
    }

    pub fn get(&self, month: YearMonth) -> Option<&MonthlyRecoveryPoint> {
        self.points.iter().find(|p| p.month == month)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(y: i32, m: u32) -> YearMonth {
        YearMonth::new(y, m).unwrap()
    }

    #[test]
    fn zero_denominator_is_no_data() {
        assert_eq!(MonthlyRate::from_counts(0, 0), MonthlyRate::NoData);
        assert_eq!(MonthlyRate::from_counts(3, 1), MonthlyRate::Rate(75.0));
        assert_eq!(MonthlyRate::NoData.to_string(), "no data");
    }

    #[test]
    fn window_fills_missing_months() {
        let mut counts = BTreeMap::new();
        counts.insert(ym(2020, 3), (3, 1));
        let series = MonthlyRecoverySeries::from_counts(&counts, Some((ym(2020, 3), ym(2020, 4))));
        assert_eq!(series.len(), 2);
        assert_eq!(series.points[0].rate, MonthlyRate::Rate(75.0));
        assert_eq!(series.points[1].rate, MonthlyRate::NoData);
    }

    #[test]
    fn year_rollover_and_label() {
        assert_eq!(ym(2019, 12).next(), ym(2020, 1));
        assert_eq!(ym(2020, 3).label(), "Mar-2020");
        assert!(YearMonth::new(2020, 13).is_none());
    }
}
