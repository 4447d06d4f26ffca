//! Wiktionary lookup over the MediaWiki query API.

use std::time::Duration;

use serde_json::Value;

use logsift_core::errors::LexiconError;
use logsift_core::traits::LexiconPredicate;

/// A token is valid when Wiktionary has a page titled with it.
#[derive(Debug, Clone)]
pub struct WiktionaryLexicon {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl WiktionaryLexicon {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, LexiconError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .gzip(true)
            .user_agent(concat!("logsift/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LexiconError::WorkerUnavailable {
                reason: e.to_string(),
            })?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }
}

impl LexiconPredicate for WiktionaryLexicon {
    fn is_valid(&self, token: &str) -> Result<bool, LexiconError> {
        let failed = |reason: String| LexiconError::RequestFailed {
            token: token.to_string(),
            reason,
        };
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("action", "query"), ("titles", token), ("format", "json")])
            .send()
            .map_err(|e| failed(e.to_string()))?;
        if !response.status().is_success() {
            return Err(failed(format!("HTTP {}", response.status())));
        }
        let body: Value = response.json().map_err(|e| LexiconError::MalformedResponse {
            token: token.to_string(),
            reason: e.to_string(),
        })?;
        page_exists(&body).ok_or_else(|| LexiconError::MalformedResponse {
            token: token.to_string(),
            reason: "missing query.pages".into(),
        })
    }
}

/// MediaWiki reports a missing title under the page id `-1`.
pub fn page_exists(body: &Value) -> Option<bool> {
    let pages = body.pointer("/query/pages")?.as_object()?;
    let first = pages.keys().next()?;
    Some(first != "-1")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_page_id_means_invalid() {
        let missing = json!({"query": {"pages": {"-1": {"title": "qwzx", "missing": ""}}}});
        let present = json!({"query": {"pages": {"12345": {"title": "leave"}}}});
        assert_eq!(page_exists(&missing), Some(false));
        assert_eq!(page_exists(&present), Some(true));
        assert_eq!(page_exists(&json!({"batchcomplete": ""})), None);
    }
}
