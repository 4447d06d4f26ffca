//! Loading a run's inputs from the configured files and sources.

use std::path::Path;
use std::sync::Arc;

use logsift_core::errors::{ConfigError, PipelineError};
use logsift_core::models::RecordSet;
use logsift_core::traits::KeywordSource;
use logsift_core::LogsiftConfig;
use logsift_index::{transport_config, ElasticsearchKeywordSource, HttpTransport};
use logsift_storage::{read_list, read_record_set, FileKeywordSource};

use crate::summary::DateWindow;

/// Everything a run consumes besides its collaborators.
#[derive(Debug, Clone)]
pub struct PipelineInput {
    pub records: RecordSet,
    /// Rows dropped while deduplicating the input.
    pub duplicate_records: usize,
    /// Raw keywords, before stopword removal.
    pub keywords: Vec<String>,
    pub unsuccessful_phrases: Vec<String>,
    pub doubtful_phrases: Vec<String>,
    pub window: Option<DateWindow>,
}

impl PipelineInput {
    pub fn new(
        records: RecordSet,
        keywords: Vec<String>,
        unsuccessful_phrases: Vec<String>,
        doubtful_phrases: Vec<String>,
    ) -> Self {
        Self {
            records,
            duplicate_records: 0,
            keywords,
            unsuccessful_phrases,
            doubtful_phrases,
            window: None,
        }
    }

    pub fn with_window(mut self, window: Option<DateWindow>) -> Self {
        self.window = window;
        self
    }

    /// Read the record CSV, keywords, and phrase lists named by `config`.
    pub fn load(config: &LogsiftConfig, records_path: &Path) -> Result<Self, PipelineError> {
        let (records, duplicate_records) = read_record_set(records_path, "all")?;
        let source = keyword_source(config)?;
        let keywords = source.fetch()?;
        tracing::info!(
            records = records.len(),
            duplicates = duplicate_records,
            keywords = keywords.len(),
            source = source.name(),
            "inputs loaded"
        );
        Ok(Self {
            records,
            duplicate_records,
            keywords,
            unsuccessful_phrases: phrase_list(
                "classify.unsuccessful_phrases",
                config.classify.unsuccessful_phrases.as_deref(),
            )?,
            doubtful_phrases: phrase_list(
                "classify.doubtful_phrases",
                config.classify.doubtful_phrases.as_deref(),
            )?,
            window: None,
        })
    }
}

/// The keyword source named by `corpus.source`.
pub fn keyword_source(config: &LogsiftConfig) -> Result<Box<dyn KeywordSource>, PipelineError> {
    match config.corpus.effective_source() {
        "elasticsearch" => {
            let transport = Arc::new(HttpTransport::new(transport_config(&config.index))?);
            Ok(Box::new(ElasticsearchKeywordSource::new(
                transport,
                config.corpus.effective_index(),
                config.corpus.effective_field(),
                config.corpus.effective_max_keywords(),
            )))
        }
        _ => {
            let path = config.corpus.path.as_deref().ok_or_else(|| missing("corpus.path"))?;
            Ok(Box::new(FileKeywordSource::new(path)))
        }
    }
}

fn phrase_list(field: &str, path: Option<&str>) -> Result<Vec<String>, PipelineError> {
    let path = path.ok_or_else(|| missing(field))?;
    Ok(read_list(Path::new(path))?)
}

fn missing(field: &str) -> PipelineError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: "required for a full run but not set".to_string(),
    }
    .into()
}
