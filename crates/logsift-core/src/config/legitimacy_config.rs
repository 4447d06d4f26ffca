//! Legitimacy filter configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_LEGITIMACY_WORKERS, DEFAULT_LEXICON, DEFAULT_LOOKUP_TIMEOUT_MS,
    DEFAULT_WIKTIONARY_ENDPOINT,
};

/// Lexicon backends understood by `legitimacy.lexicon`.
pub const LEXICONS: &[&str] = &["wiktionary", "wordlist"];

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LegitimacyConfig {
    /// Run the legitimacy stage at all. Default: true.
    pub enabled: Option<bool>,
    /// Worker count; the record population is split into this many chunks. Default: 8.
    pub workers: Option<usize>,
    /// Per-lookup timeout in milliseconds. Default: 5000.
    pub lookup_timeout_ms: Option<u64>,
    /// `wiktionary` or `wordlist`. Default: wiktionary.
    pub lexicon: Option<String>,
    /// MediaWiki API endpoint for the wiktionary lexicon.
    pub endpoint: Option<String>,
    /// Newline-delimited word list for the wordlist lexicon.
    pub word_list: Option<String>,
}

impl LegitimacyConfig {
    pub fn effective_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn effective_workers(&self) -> usize {
        self.workers.unwrap_or(DEFAULT_LEGITIMACY_WORKERS)
    }

    pub fn effective_lookup_timeout_ms(&self) -> u64 {
        self.lookup_timeout_ms.unwrap_or(DEFAULT_LOOKUP_TIMEOUT_MS)
    }

    pub fn effective_lexicon(&self) -> &str {
        self.lexicon.as_deref().unwrap_or(DEFAULT_LEXICON)
    }

    pub fn effective_endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_WIKTIONARY_ENDPOINT)
    }
}
