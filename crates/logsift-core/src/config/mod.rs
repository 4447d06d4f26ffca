//! Configuration system for logsift.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod classify_config;
pub mod corpus_config;
pub mod index_config;
pub mod legitimacy_config;
pub mod logging_config;
pub mod logsift_config;
pub mod output_config;
pub mod prefilter_config;
pub mod recovery_config;

pub use classify_config::{ClassifyConfig, OverlapPolicy};
pub use corpus_config::CorpusConfig;
pub use index_config::IndexConfig;
pub use legitimacy_config::LegitimacyConfig;
pub use logging_config::LoggingConfig;
pub use logsift_config::{CliOverrides, LogsiftConfig};
pub use output_config::OutputConfig;
pub use prefilter_config::PrefilterConfig;
pub use recovery_config::RecoveryConfig;

/// Owned copy of a compiled default list, used when a list field is left empty.
pub(crate) fn default_list(defaults: &[&str]) -> Vec<String> {
    defaults.iter().map(|s| s.to_string()).collect()
}
