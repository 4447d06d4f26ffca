//! Keyword corpus preparation.

use rustc_hash::FxHashSet;

use logsift_core::config::CorpusConfig;
use logsift_core::errors::CorpusError;
use logsift_core::models::KeywordCorpus;
use logsift_core::text::word_tokens;

/// English stopwords removed from every keyword.
pub const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

/// A prepared corpus and what preparation removed.
#[derive(Debug, Clone)]
pub struct PreparedCorpus {
    pub corpus: KeywordCorpus,
    /// Keywords that were only stopwords or punctuation.
    pub emptied: usize,
    /// Case-insensitive duplicates after stopword removal.
    pub duplicates: usize,
    /// Keywords beyond the cap.
    pub truncated: usize,
}

#[derive(Debug, Clone)]
pub struct CorpusPreparer {
    stopwords: FxHashSet<String>,
    max_keywords: usize,
}

impl CorpusPreparer {
    pub fn new(extra_stopwords: &[String], max_keywords: usize) -> Self {
        let stopwords = STOPWORDS
            .iter()
            .map(|s| s.to_string())
            .chain(extra_stopwords.iter().map(|s| s.trim().to_lowercase()))
            .collect();
        Self {
            stopwords,
            max_keywords,
        }
    }

    pub fn from_config(config: &CorpusConfig) -> Self {
        Self::new(&config.extra_stopwords, config.effective_max_keywords())
    }

    /// Strip stopwords from each keyword, drop emptied and duplicate
    /// keywords, and cap the result.
    pub fn prepare(&self, raw: &[String]) -> Result<PreparedCorpus, CorpusError> {
        let mut seen = FxHashSet::default();
        let mut clauses = Vec::new();
        let (mut emptied, mut duplicates) = (0, 0);

        for keyword in raw {
            let clause = word_tokens(keyword)
                .filter(|t| !self.stopwords.contains(&t.to_lowercase()))
                .collect::<Vec<_>>()
                .join(" ");
            if clause.is_empty() {
                emptied += 1;
            } else if !seen.insert(clause.to_lowercase()) {
                duplicates += 1;
            } else {
                clauses.push(clause);
            }
        }

        let truncated = clauses.len().saturating_sub(self.max_keywords);
        if truncated > 0 {
            tracing::warn!(
                kept = self.max_keywords,
                truncated,
                "keyword corpus exceeds the cap; extra keywords ignored"
            );
            clauses.truncate(self.max_keywords);
        }
        if clauses.is_empty() {
            return Err(CorpusError::Empty { raw: raw.len() });
        }

        Ok(PreparedCorpus {
            corpus: KeywordCorpus::new(clauses, raw.len()),
            emptied,
            duplicates,
            truncated,
        })
    }
}
