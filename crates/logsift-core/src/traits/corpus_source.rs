use crate::errors::CorpusError;

/// Supplies the raw domain-entity keywords for a run.
pub trait KeywordSource {
    /// Source label for logs.
    fn name(&self) -> &str;

    /// Fetch the raw keyword strings, in source order.
    fn fetch(&self) -> Result<Vec<String>, CorpusError>;
}
