//! Top-level logsift configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{
    corpus_config, index_config, legitimacy_config, ClassifyConfig, CorpusConfig, IndexConfig,
    LegitimacyConfig, LoggingConfig, OutputConfig, OverlapPolicy, PrefilterConfig,
    RecoveryConfig,
};
use crate::errors::ConfigError;
use crate::query::Fuzziness;

/// Project config file name, looked up in the working root.
pub const PROJECT_CONFIG_FILE: &str = "logsift.toml";

/// Top-level configuration aggregating all sections.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`LOGSIFT_*`)
/// 3. Project config (`logsift.toml` in the root, or an explicit file)
/// 4. User config (`~/.logsift/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LogsiftConfig {
    pub legitimacy: LegitimacyConfig,
    pub prefilter: PrefilterConfig,
    pub index: IndexConfig,
    pub corpus: CorpusConfig,
    pub classify: ClassifyConfig,
    pub recovery: RecoveryConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub legitimacy_enabled: Option<bool>,
    pub legitimacy_workers: Option<usize>,
    pub index_backend: Option<String>,
    pub index_url: Option<String>,
    pub fuzziness: Option<String>,
    pub keywords_path: Option<String>,
    pub unsuccessful_phrases: Option<String>,
    pub doubtful_phrases: Option<String>,
    pub recovery_concurrency: Option<usize>,
    pub output_dir: Option<String>,
}

impl LogsiftConfig {
    /// Load configuration with layered resolution, reading `logsift.toml`
    /// from `root` as the project layer.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        Self::load_with_file(root, None, cli_overrides)
    }

    /// Like [`LogsiftConfig::load`], but an explicit `config_file` replaces
    /// the project `logsift.toml`. A missing explicit file is an error.
    pub fn load_with_file(
        root: &Path,
        config_file: Option<&Path>,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(path = %user_config_path.display(), error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        match config_file {
            Some(path) => Self::merge_toml_file(&mut config, path)?,
            None => {
                let project_config_path = root.join(PROJECT_CONFIG_FILE);
                if project_config_path.exists() {
                    Self::merge_toml_file(&mut config, &project_config_path)?;
                }
            }
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &LogsiftConfig) -> Result<(), ConfigError> {
        positive("legitimacy.workers", config.legitimacy.workers)?;
        positive("recovery.concurrency", config.recovery.concurrency)?;
        positive("index.max_results", config.index.max_results)?;
        positive("index.max_clauses", config.index.max_clauses)?;
        positive("index.bulk_batch_size", config.index.bulk_batch_size)?;
        positive("corpus.max_keywords", config.corpus.max_keywords)?;
        if config.legitimacy.lookup_timeout_ms == Some(0) {
            return Err(invalid("legitimacy.lookup_timeout_ms", "must be greater than 0"));
        }

        one_of(
            "legitimacy.lexicon",
            config.legitimacy.effective_lexicon(),
            legitimacy_config::LEXICONS,
        )?;
        if config.legitimacy.effective_lexicon() == "wordlist" && config.legitimacy.word_list.is_none() {
            return Err(invalid(
                "legitimacy.word_list",
                "required when legitimacy.lexicon = \"wordlist\"",
            ));
        }
        one_of("index.backend", config.index.effective_backend(), index_config::BACKENDS)?;
        one_of("corpus.source", config.corpus.effective_source(), corpus_config::SOURCES)?;

        if let Some(ref fuzziness) = config.index.fuzziness {
            fuzziness
                .parse::<Fuzziness>()
                .map_err(|message| invalid("index.fuzziness", &message))?;
        }
        if let Some(ref policy) = config.classify.overlap_policy {
            policy
                .parse::<OverlapPolicy>()
                .map_err(|message| invalid("classify.overlap_policy", &message))?;
        }
        if config.classify.masked_email.as_deref().is_some_and(|m| m.trim().is_empty()) {
            return Err(invalid("classify.masked_email", "must not be blank"));
        }
        Ok(())
    }

    /// Returns the user config path: `~/.logsift/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        dirs_path().map(|d| d.join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut LogsiftConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: LogsiftConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`: `Some` values and non-empty lists in
    /// `other` win.
    pub fn merge(base: &mut LogsiftConfig, other: &LogsiftConfig) {
        // Legitimacy
        take(&mut base.legitimacy.enabled, &other.legitimacy.enabled);
        take(&mut base.legitimacy.workers, &other.legitimacy.workers);
        take(&mut base.legitimacy.lookup_timeout_ms, &other.legitimacy.lookup_timeout_ms);
        take(&mut base.legitimacy.lexicon, &other.legitimacy.lexicon);
        take(&mut base.legitimacy.endpoint, &other.legitimacy.endpoint);
        take(&mut base.legitimacy.word_list, &other.legitimacy.word_list);

        // Prefilter
        take_list(&mut base.prefilter.excluded_intents, &other.prefilter.excluded_intents);
        take(&mut base.prefilter.drop_empty_response, &other.prefilter.drop_empty_response);

        // Index
        take(&mut base.index.backend, &other.index.backend);
        take(&mut base.index.url, &other.index.url);
        take(&mut base.index.prefix, &other.index.prefix);
        take(&mut base.index.max_results, &other.index.max_results);
        take(&mut base.index.max_clauses, &other.index.max_clauses);
        take(&mut base.index.fuzziness, &other.index.fuzziness);
        take(&mut base.index.request_timeout_ms, &other.index.request_timeout_ms);
        take(&mut base.index.max_retries, &other.index.max_retries);
        take(&mut base.index.initial_backoff_ms, &other.index.initial_backoff_ms);
        take(&mut base.index.bulk_batch_size, &other.index.bulk_batch_size);

        // Corpus
        take(&mut base.corpus.source, &other.corpus.source);
        take(&mut base.corpus.path, &other.corpus.path);
        take(&mut base.corpus.index, &other.corpus.index);
        take(&mut base.corpus.field, &other.corpus.field);
        take(&mut base.corpus.max_keywords, &other.corpus.max_keywords);
        take_list(&mut base.corpus.extra_stopwords, &other.corpus.extra_stopwords);

        // Classify
        take(&mut base.classify.unsuccessful_phrases, &other.classify.unsuccessful_phrases);
        take(&mut base.classify.doubtful_phrases, &other.classify.doubtful_phrases);
        take_list(&mut base.classify.filler_tokens, &other.classify.filler_tokens);
        take_list(&mut base.classify.dropped_tokens, &other.classify.dropped_tokens);
        take(&mut base.classify.masked_email, &other.classify.masked_email);
        take(&mut base.classify.email_response_marker, &other.classify.email_response_marker);
        take(
            &mut base.classify.biometric_response_marker,
            &other.classify.biometric_response_marker,
        );
        take_list(&mut base.classify.biometric_terms, &other.classify.biometric_terms);
        take(&mut base.classify.overlap_policy, &other.classify.overlap_policy);
        take(&mut base.classify.resolve_general_doubt, &other.classify.resolve_general_doubt);

        // Recovery
        take(&mut base.recovery.concurrency, &other.recovery.concurrency);
        take_list(&mut base.recovery.timestamp_formats, &other.recovery.timestamp_formats);

        // Output
        take(&mut base.output.dir, &other.output.dir);
        take(&mut base.output.top_n, &other.output.top_n);

        // Logging
        take(&mut base.logging.filter, &other.logging.filter);
        take(&mut base.logging.json, &other.logging.json);
    }

    /// Apply environment variable overrides.
    /// Pattern: `LOGSIFT_LEGITIMACY_WORKERS`, `LOGSIFT_INDEX_URL`, etc.
    /// Values that fail to parse are ignored.
    fn apply_env_overrides(config: &mut LogsiftConfig) {
        if let Some(v) = env_parsed("LOGSIFT_LEGITIMACY_ENABLED") {
            config.legitimacy.enabled = Some(v);
        }
        if let Some(v) = env_parsed("LOGSIFT_LEGITIMACY_WORKERS") {
            config.legitimacy.workers = Some(v);
        }
        if let Some(v) = env_parsed("LOGSIFT_LEGITIMACY_TIMEOUT_MS") {
            config.legitimacy.lookup_timeout_ms = Some(v);
        }
        if let Ok(val) = std::env::var("LOGSIFT_LEXICON") {
            config.legitimacy.lexicon = Some(val);
        }
        if let Ok(val) = std::env::var("LOGSIFT_INDEX_BACKEND") {
            config.index.backend = Some(val);
        }
        if let Ok(val) = std::env::var("LOGSIFT_INDEX_URL") {
            config.index.url = Some(val);
        }
        if let Ok(val) = std::env::var("LOGSIFT_INDEX_FUZZINESS") {
            config.index.fuzziness = Some(val);
        }
        if let Some(v) = env_parsed("LOGSIFT_INDEX_MAX_RESULTS") {
            config.index.max_results = Some(v);
        }
        if let Ok(val) = std::env::var("LOGSIFT_CORPUS_SOURCE") {
            config.corpus.source = Some(val);
        }
        if let Some(v) = env_parsed("LOGSIFT_RECOVERY_CONCURRENCY") {
            config.recovery.concurrency = Some(v);
        }
        if let Ok(val) = std::env::var("LOGSIFT_OUTPUT_DIR") {
            config.output.dir = Some(val);
        }
        if let Some(v) = env_parsed("LOGSIFT_LOG_JSON") {
            config.logging.json = Some(v);
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut LogsiftConfig, cli: &CliOverrides) {
        take(&mut config.legitimacy.enabled, &cli.legitimacy_enabled);
        take(&mut config.legitimacy.workers, &cli.legitimacy_workers);
        take(&mut config.index.backend, &cli.index_backend);
        take(&mut config.index.url, &cli.index_url);
        take(&mut config.index.fuzziness, &cli.fuzziness);
        take(&mut config.corpus.path, &cli.keywords_path);
        take(&mut config.classify.unsuccessful_phrases, &cli.unsuccessful_phrases);
        take(&mut config.classify.doubtful_phrases, &cli.doubtful_phrases);
        take(&mut config.recovery.concurrency, &cli.recovery_concurrency);
        take(&mut config.output.dir, &cli.output_dir);
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// A copy with every unset value replaced by its compiled default.
    pub fn resolved(&self) -> LogsiftConfig {
        let mut out = self.clone();
        let l = &mut out.legitimacy;
        l.enabled = Some(self.legitimacy.effective_enabled());
        l.workers = Some(self.legitimacy.effective_workers());
        l.lookup_timeout_ms = Some(self.legitimacy.effective_lookup_timeout_ms());
        l.lexicon = Some(self.legitimacy.effective_lexicon().to_string());
        l.endpoint = Some(self.legitimacy.effective_endpoint().to_string());

        out.prefilter.excluded_intents = self.prefilter.effective_excluded_intents();
        out.prefilter.drop_empty_response = Some(self.prefilter.effective_drop_empty_response());

        let i = &mut out.index;
        i.backend = Some(self.index.effective_backend().to_string());
        i.url = Some(self.index.effective_url().to_string());
        i.prefix = Some(self.index.effective_prefix().to_string());
        i.max_results = Some(self.index.effective_max_results());
        i.max_clauses = Some(self.index.effective_max_clauses());
        i.fuzziness = Some(self.index.effective_fuzziness().to_string());
        i.request_timeout_ms = Some(self.index.effective_request_timeout_ms());
        i.max_retries = Some(self.index.effective_max_retries());
        i.initial_backoff_ms = Some(self.index.effective_initial_backoff_ms());
        i.bulk_batch_size = Some(self.index.effective_bulk_batch_size());

        let c = &mut out.corpus;
        c.source = Some(self.corpus.effective_source().to_string());
        c.index = Some(self.corpus.effective_index().to_string());
        c.field = Some(self.corpus.effective_field().to_string());
        c.max_keywords = Some(self.corpus.effective_max_keywords());

        let k = &mut out.classify;
        k.filler_tokens = self.classify.effective_filler_tokens();
        k.dropped_tokens = self.classify.effective_dropped_tokens();
        k.masked_email = Some(self.classify.effective_masked_email().to_string());
        k.email_response_marker = Some(self.classify.effective_email_response_marker().to_string());
        k.biometric_response_marker =
            Some(self.classify.effective_biometric_response_marker().to_string());
        k.biometric_terms = self.classify.effective_biometric_terms();
        k.overlap_policy = Some(self.classify.effective_overlap_policy().to_string());
        k.resolve_general_doubt = Some(self.classify.effective_resolve_general_doubt());

        out.recovery.concurrency = Some(self.recovery.effective_concurrency());
        out.recovery.timestamp_formats = self.recovery.effective_timestamp_formats();
        out.output.dir = Some(self.output.effective_dir().to_string());
        out.output.top_n = Some(self.output.effective_top_n());
        out.logging.filter = Some(self.logging.effective_filter().to_string());
        out.logging.json = Some(self.logging.effective_json());
        out
    }
}

fn take<T: Clone>(base: &mut Option<T>, other: &Option<T>) {
    if other.is_some() {
        base.clone_from(other);
    }
}

fn take_list(base: &mut Vec<String>, other: &[String]) {
    if !other.is_empty() {
        *base = other.to_vec();
    }
}

fn env_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

fn positive(field: &str, value: Option<usize>) -> Result<(), ConfigError> {
    if value == Some(0) {
        return Err(invalid(field, "must be greater than 0"));
    }
    Ok(())
}

fn one_of(field: &str, value: &str, allowed: &[&str]) -> Result<(), ConfigError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(invalid(
            field,
            &format!("unknown value {value:?} (expected one of {})", allowed.join(", ")),
        ))
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// Returns the user-level config directory: `~/.logsift/`.
fn dirs_path() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".logsift"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
