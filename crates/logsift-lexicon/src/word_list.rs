use std::path::Path;

use rustc_hash::FxHashSet;

use logsift_core::errors::LexiconError;
use logsift_core::traits::LexiconPredicate;

/// Offline lexicon backed by a newline-delimited word list. Case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct WordListLexicon {
    words: FxHashSet<String>,
}

impl WordListLexicon {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    pub fn load(path: &Path) -> Result<Self, LexiconError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| LexiconError::WordListUnavailable {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self::from_words(content.lines()))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl LexiconPredicate for WordListLexicon {
    fn is_valid(&self, token: &str) -> Result<bool, LexiconError> {
        Ok(self.words.contains(&token.to_lowercase()))
    }
}
