use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_KEYWORD_FIELD, DEFAULT_KEYWORD_INDEX, DEFAULT_KEYWORD_SOURCE, DEFAULT_MAX_KEYWORDS,
};

/// Keyword sources understood by `corpus.source`.
pub const SOURCES: &[&str] = &["file", "elasticsearch"];

/// Where keywords come from and how many are kept.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CorpusConfig {
    /// `file` or `elasticsearch`. Default: file.
    pub source: Option<String>,
    /// Keyword file for the file source.
    pub path: Option<String>,
    /// Keyword index for the elasticsearch source.
    pub index: Option<String>,
    /// Document field holding the keyword text.
    pub field: Option<String>,
    /// Cap on prepared keywords. Default: 3000.
    pub max_keywords: Option<usize>,
    /// Stopwords removed in addition to the built-in English list.
    pub extra_stopwords: Vec<String>,
}

impl CorpusConfig {
    pub fn effective_source(&self) -> &str {
        self.source.as_deref().unwrap_or(DEFAULT_KEYWORD_SOURCE)
    }

    pub fn effective_index(&self) -> &str {
        self.index.as_deref().unwrap_or(DEFAULT_KEYWORD_INDEX)
    }

    pub fn effective_field(&self) -> &str {
        self.field.as_deref().unwrap_or(DEFAULT_KEYWORD_FIELD)
    }

    pub fn effective_max_keywords(&self) -> usize {
        self.max_keywords.unwrap_or(DEFAULT_MAX_KEYWORDS)
    }
}
