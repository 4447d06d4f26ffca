//! # logsift-lexicon
//!
//! Drops records whose query contains no legitimate word.
//!
//! - [`LegitimacyFilter`]: fixed worker pool over equal chunks, per-call timeout.
//! - [`WiktionaryLexicon`], [`WordListLexicon`]: lexicon predicates.

pub mod filter;
mod timed_caller;
pub mod wiktionary;
pub mod word_list;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use logsift_core::config::LegitimacyConfig;
use logsift_core::errors::LexiconError;
use logsift_core::traits::LexiconPredicate;

pub use filter::{LegitimacyFilter, LegitimacyOutcome};
pub use wiktionary::WiktionaryLexicon;
pub use word_list::WordListLexicon;

/// Build the lexicon named by `legitimacy.lexicon`.
pub fn lexicon_from_config(
    config: &LegitimacyConfig,
) -> Result<Arc<dyn LexiconPredicate>, LexiconError> {
    match config.effective_lexicon() {
        "wordlist" => {
            let path = config
                .word_list
                .as_deref()
                .ok_or_else(|| LexiconError::WordListUnavailable {
                    path: String::new(),
                    reason: "legitimacy.word_list is not set".into(),
                })?;
            Ok(Arc::new(WordListLexicon::load(Path::new(path))?))
        }
        _ => Ok(Arc::new(WiktionaryLexicon::new(
            config.effective_endpoint(),
            Duration::from_millis(config.effective_lookup_timeout_ms()),
        )?)),
    }
}
