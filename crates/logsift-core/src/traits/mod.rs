//! Capabilities passed explicitly into pipeline components.

pub mod corpus_source;
pub mod lexicon;
pub mod search_index;

pub use corpus_source::KeywordSource;
pub use lexicon::LexiconPredicate;
pub use search_index::{IndexBackend, SearchHits, SearchIndex};
