//! # logsift-recovery
//!
//! Finds unsuccessful queries that were asked again later, pairs them with
//! the later attempt, and aggregates the pairs into a monthly recovery rate.

pub mod detector;
pub mod monthly;
pub mod summary;
pub mod timestamp;

pub use detector::{RecoveryDetector, RecoveryOutcome};
pub use monthly::{monthly_counts, monthly_series};
pub use summary::RecoverySummary;
pub use timestamp::TimestampParser;
