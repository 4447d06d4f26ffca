use std::sync::Arc;

use reqwest::Method;
use serde_json::{json, Value};

use logsift_core::errors::CorpusError;
use logsift_core::traits::KeywordSource;

use super::transport::{HttpTransport, RequestBody};

/// Reads keywords from one `_source` field of a keyword index.
#[derive(Debug)]
pub struct ElasticsearchKeywordSource {
    transport: Arc<HttpTransport>,
    index: String,
    field: String,
    size: usize,
}

impl ElasticsearchKeywordSource {
    pub fn new(transport: Arc<HttpTransport>, index: &str, field: &str, size: usize) -> Self {
        Self {
            transport,
            index: index.to_string(),
            field: field.to_string(),
            size,
        }
    }
}

impl KeywordSource for ElasticsearchKeywordSource {
    fn name(&self) -> &str {
        &self.index
    }

    fn fetch(&self) -> Result<Vec<String>, CorpusError> {
        let body = RequestBody::Json(json!({
            "query": { "match_all": {} },
            "size": self.size,
            "_source": [self.field],
        }));
        let response = self
            .transport
            .send(Method::POST, &format!("/{}/_search", self.index), Some(&body), &self.index)
            .map_err(|e| CorpusError::SourceUnavailable {
                source_name: self.index.clone(),
                reason: e.to_string(),
            })?;

        let keywords = response
            .pointer("/hits/hits")
            .and_then(Value::as_array)
            .map(|hits| {
                hits.iter()
                    .filter_map(|hit| hit.get("_source")?.get(&self.field)?.as_str())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Ok(keywords)
    }
}
