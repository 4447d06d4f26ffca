//! # logsift-core
//!
//! Foundation crate for the logsift pipeline.
//! Defines records, record sets, the query model, index and lexicon traits,
//! errors, layered config, pipeline events, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod models;
pub mod query;
pub mod text;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::LogsiftConfig;
pub use errors::PipelineError;
pub use models::{
    Category, KeywordCorpus, MonthlyRecoverySeries, Record, RecordSet, RecoveryPair, RunReport,
    YearMonth,
};
pub use query::{Fuzziness, MatchMode, Operator, RecordField, SearchQuery};
pub use traits::{IndexBackend, KeywordSource, LexiconPredicate, SearchHits, SearchIndex};
