//! Reporting summary handed to the dashboard layer.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use logsift_core::models::{MonthlyRecoverySeries, Record, RecordSet, RecoveryPair, RunReport, YearMonth};
use logsift_recovery::{RecoverySummary, TimestampParser};

/// Inclusive calendar-date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateWindow {
    /// `None` when `from` is after `to`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Option<Self> {
        (from <= to).then_some(Self { from, to })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.from..=self.to).contains(&date)
    }

    pub fn months(&self) -> (YearMonth, YearMonth) {
        (YearMonth::of_date(self.from), YearMonth::of_date(self.to))
    }

    /// Records whose timestamp parses to a date inside the window.
    pub fn restrict(&self, set: &RecordSet, parser: &TimestampParser) -> RecordSet {
        set.filter(set.name(), |r| self.admits(r, parser))
    }

    /// Pairs whose unsuccessful record falls inside the window.
    pub fn restrict_pairs(&self, pairs: &[RecoveryPair], parser: &TimestampParser) -> Vec<RecoveryPair> {
        pairs
            .iter()
            .filter(|p| self.admits(&p.unsuccessful, parser))
            .cloned()
            .collect()
    }

    fn admits(&self, record: &Record, parser: &TimestampParser) -> bool {
        parser
            .parse(&record.timestamp)
            .is_some_and(|at| self.contains(at.date()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frequency {
    pub value: String,
    pub count: usize,
}

/// Top-N tables for the whole input and each category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrequencyTables {
    pub all: Vec<Frequency>,
    pub domain: Vec<Frequency>,
    pub general: Vec<Frequency>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub run_id: String,
    pub window: Option<DateWindow>,
    /// Size of every output set, by set name.
    pub counts: BTreeMap<String, usize>,
    pub intents: FrequencyTables,
    pub events: FrequencyTables,
    pub recovery: RecoverySummary,
    pub monthly: MonthlyRecoverySeries,
    pub report: RunReport,
}

/// The `top_n` most frequent non-blank values, count descending then
/// value ascending.
pub fn top_values<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    value: impl Fn(&Record) -> &str,
    top_n: usize,
) -> Vec<Frequency> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        let v = value(record).trim();
        if !v.is_empty() {
            *counts.entry(v).or_default() += 1;
        }
    }
    let mut table: Vec<Frequency> = counts
        .into_iter()
        .map(|(value, count)| Frequency {
            value: value.to_string(),
            count,
        })
        .collect();
    table.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    table.truncate(top_n);
    table
}

pub(crate) fn tables(
    all: &RecordSet,
    domain: &RecordSet,
    general: &RecordSet,
    value: impl Fn(&Record) -> &str + Copy,
    top_n: usize,
) -> FrequencyTables {
    let top = |set: &RecordSet| top_values(set.iter().map(|r| r.as_ref()), value, top_n);
    FrequencyTables {
        all: top(all),
        domain: top(domain),
        general: top(general),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_intent(session: &str, intent: &str) -> Record {
        Record::new(session, "2020-03-01", intent, "message", "q", "r")
    }

    #[test]
    fn top_values_orders_by_count_then_name() {
        let records = vec![
            with_intent("1", "Leave"),
            with_intent("2", "Salary"),
            with_intent("3", "Leave"),
            with_intent("4", "Attendance"),
            with_intent("5", "Salary"),
            with_intent("6", ""),
        ];
        let table = top_values(records.iter(), |r| r.intent_name.as_str(), 2);
        assert_eq!(
            table,
            vec![
                Frequency { value: "Leave".into(), count: 2 },
                Frequency { value: "Salary".into(), count: 2 },
            ]
        );
    }

    #[test]
    fn window_is_inclusive() {
        let d = |m, day| NaiveDate::from_ymd_opt(2020, m, day).unwrap();
        let window = DateWindow::new(d(3, 1), d(3, 31)).unwrap();
        assert!(window.contains(d(3, 1)));
        assert!(window.contains(d(3, 31)));
        assert!(!window.contains(d(4, 1)));
        assert!(DateWindow::new(d(4, 1), d(3, 1)).is_none());
    }
}
