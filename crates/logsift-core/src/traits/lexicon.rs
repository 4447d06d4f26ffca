use crate::errors::LexiconError;

/// Answers whether a token is a legitimate word.
///
/// Calls may be slow (remote lookups). An `Err` is treated by callers as
/// "not valid" and counted, never retried.
pub trait LexiconPredicate: Send + Sync {
    fn is_valid(&self, token: &str) -> Result<bool, LexiconError>;
}

impl<F> LexiconPredicate for F
where
    F: Fn(&str) -> Result<bool, LexiconError> + Send + Sync,
{
    fn is_valid(&self, token: &str) -> Result<bool, LexiconError> {
        self(token)
    }
}
