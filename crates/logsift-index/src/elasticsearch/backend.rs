use std::sync::Arc;

use reqwest::Method;
use serde_json::Value;

use logsift_core::errors::IndexError;
use logsift_core::models::{Record, RecordSet};
use logsift_core::query::SearchQuery;
use logsift_core::traits::{IndexBackend, SearchHits, SearchIndex};

use super::dsl;
use super::transport::{HttpTransport, RequestBody};

/// Opens record indexes on an Elasticsearch-compatible service.
#[derive(Debug, Clone)]
pub struct ElasticsearchBackend {
    transport: Arc<HttpTransport>,
    prefix: String,
    max_results: usize,
    bulk_batch_size: usize,
}

impl ElasticsearchBackend {
    pub fn new(
        transport: Arc<HttpTransport>,
        prefix: &str,
        max_results: usize,
        bulk_batch_size: usize,
    ) -> Self {
        Self {
            transport,
            prefix: prefix.to_string(),
            max_results,
            bulk_batch_size: bulk_batch_size.max(1),
        }
    }

    /// Remote index name for a logical set name.
    pub fn index_name(&self, name: &str) -> String {
        format!("{}-{}", self.prefix, name).to_lowercase().replace(' ', "_")
    }

    fn recreate(&self, index: &str) -> Result<(), IndexError> {
        match self
            .transport
            .send(Method::DELETE, &format!("/{index}"), None, index)
        {
            Ok(_) | Err(IndexError::BadStatus { status: 404, .. }) => {}
            Err(e) => return Err(e),
        }
        let definition = RequestBody::Json(dsl::index_definition(self.max_results));
        self.transport
            .send(Method::PUT, &format!("/{index}"), Some(&definition), index)?;
        Ok(())
    }

    fn bulk_load(&self, index: &str, records: &RecordSet) -> Result<(), IndexError> {
        for (batch_no, batch) in records.as_slice().chunks(self.bulk_batch_size).enumerate() {
            let mut ndjson = String::new();
            for (offset, record) in batch.iter().enumerate() {
                let id = batch_no * self.bulk_batch_size + offset;
                let doc = serde_json::to_string(record.as_ref()).map_err(|e| load_failed(index, records, e))?;
                ndjson.push_str(&format!("{{\"index\":{{\"_id\":\"{id}\"}}}}\n{doc}\n"));
            }
            let response = self.transport.send(
                Method::POST,
                &format!("/{index}/_bulk"),
                Some(&RequestBody::Ndjson(ndjson)),
                index,
            )?;
            if response.get("errors").and_then(Value::as_bool) == Some(true) {
                return Err(load_failed(index, records, "bulk response reported item errors"));
            }
        }
        self.transport
            .send(Method::POST, &format!("/{index}/_refresh"), None, index)?;
        Ok(())
    }
}

fn load_failed(index: &str, records: &RecordSet, reason: impl ToString) -> IndexError {
    IndexError::LoadFailed {
        index: index.to_string(),
        count: records.len(),
        reason: reason.to_string(),
    }
}

impl IndexBackend for ElasticsearchBackend {
    fn kind(&self) -> &'static str {
        "elasticsearch"
    }

    fn open(&self, name: &str, records: &RecordSet) -> Result<Arc<dyn SearchIndex>, IndexError> {
        let index = self.index_name(name);
        self.recreate(&index)?;
        self.bulk_load(&index, records)?;
        tracing::info!(index = %index, docs = records.len(), "elasticsearch index loaded");
        Ok(Arc::new(ElasticsearchIndex {
            name: index,
            transport: Arc::clone(&self.transport),
            max_results: self.max_results,
        }))
    }
}

/// One remote record index.
#[derive(Debug)]
pub struct ElasticsearchIndex {
    name: String,
    transport: Arc<HttpTransport>,
    max_results: usize,
}

impl SearchIndex for ElasticsearchIndex {
    fn name(&self) -> &str {
        &self.name
    }

    fn search(&self, query: &SearchQuery, size: usize) -> Result<SearchHits, IndexError> {
        let body = RequestBody::Json(dsl::search_body(query, size.min(self.max_results)));
        let response = self.transport.send(
            Method::POST,
            &format!("/{}/_search", self.name),
            Some(&body),
            &self.name,
        )?;
        parse_hits(&self.name, &response)
    }

    fn max_results(&self) -> usize {
        self.max_results
    }
}

/// Extract records and the total from a `_search` response.
pub(super) fn parse_hits(index: &str, response: &Value) -> Result<SearchHits, IndexError> {
    let malformed = |reason: &str| IndexError::MalformedResponse {
        index: index.to_string(),
        reason: reason.to_string(),
    };
    let hits = response
        .pointer("/hits/hits")
        .and_then(Value::as_array)
        .ok_or_else(|| malformed("missing hits.hits"))?;
    let records = hits
        .iter()
        .map(|hit| {
            let source = hit.get("_source").ok_or_else(|| malformed("hit without _source"))?;
            serde_json::from_value::<Record>(source.clone())
                .map(Arc::new)
                .map_err(|e| malformed(&e.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    // `hits.total` is an object on current servers and a bare number on old ones.
    let total = match response.pointer("/hits/total") {
        Some(Value::Object(o)) => o.get("value").and_then(Value::as_u64),
        Some(v) => v.as_u64(),
        None => None,
    }
    .map(|t| t as usize)
    .unwrap_or(records.len());
    Ok(SearchHits {
        total: total.max(records.len()),
        hits: records,
    })
}
