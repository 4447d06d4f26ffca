//! # logsift-classify
//!
//! Splits records into domain/general and then into successful, doubtful
//! and unsuccessful sets; resolves doubtful records.
//!
//! Every index is obtained from the `IndexBackend` handed in at
//! construction. Queries that fail against an open index degrade to
//! "no match" and are counted; only failing to open an index is an error.

pub mod corpus;
pub mod doubt;
pub mod matcher;
pub mod partitioner;
pub mod phrases;
pub mod prefilter;
pub mod rules;

pub use corpus::{CorpusPreparer, PreparedCorpus};
pub use doubt::{merge_final, DoubtResolution, DoubtResolver, FinalSets};
pub use matcher::{KeywordMatcher, MatchOutcome};
pub use partitioner::{DomainOverrides, DomainSplit, OutcomeSplit, Partitioner};
pub use phrases::PhraseList;
pub use prefilter::{Prefilter, PrefilterOutcome};
pub use rules::RelocationRule;
