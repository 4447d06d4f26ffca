//! Case-insensitive multi-phrase containment.

use aho_corasick::AhoCorasick;

use logsift_core::errors::ClassifyError;

/// A fixed list of phrases; a text matches when it contains any of them,
/// ignoring case. Blank phrases are skipped so they never match everything.
#[derive(Debug, Clone)]
pub struct PhraseList {
    name: String,
    phrases: Vec<String>,
    automaton: Option<AhoCorasick>,
}

impl PhraseList {
    pub fn new<I, S>(name: &str, phrases: I) -> Result<Self, ClassifyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases: Vec<String> = phrases
            .into_iter()
            .map(|p| p.as_ref().trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        let automaton = if phrases.is_empty() {
            None
        } else {
            Some(
                AhoCorasick::new(&phrases).map_err(|e| ClassifyError::InvalidPhraseList {
                    name: name.to_string(),
                    reason: e.to_string(),
                })?,
            )
        };
        Ok(Self {
            name: name.to_string(),
            phrases,
            automaton,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn is_match(&self, text: &str) -> bool {
        match &self.automaton {
            Some(ac) => ac.is_match(&text.to_lowercase()),
            None => false,
        }
    }
}
