//! Data model: records, record sets, recovery pairs, the keyword corpus,
//! monthly recovery series, and the run report.

pub mod corpus;
pub mod monthly;
pub mod record;
pub mod record_set;
pub mod recovery_pair;
pub mod run_report;

pub use corpus::KeywordCorpus;
pub use monthly::{MonthlyRate, MonthlyRecoveryPoint, MonthlyRecoverySeries, YearMonth};
pub use record::{Category, Record};
pub use record_set::RecordSet;
pub use recovery_pair::{dedup_pairs, pairs_within, RecoveryPair};
pub use run_report::RunReport;
