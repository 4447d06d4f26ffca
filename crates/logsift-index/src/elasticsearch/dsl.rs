//! Translation of [`SearchQuery`] into the Elasticsearch query DSL.

use serde_json::{json, Map, Value};

use logsift_core::query::{Operator, SearchQuery};

pub fn to_dsl(query: &SearchQuery) -> Value {
    match query {
        SearchQuery::MatchAll => json!({ "match_all": {} }),
        SearchQuery::Match {
            field,
            text,
            operator,
            fuzziness,
        } => json!({
            "match": {
                field.name(): {
                    "query": text,
                    "operator": match operator {
                        Operator::And => "and",
                        Operator::Or => "or",
                    },
                    "fuzziness": fuzziness.to_string(),
                }
            }
        }),
        SearchQuery::MatchPhrase { field, text } => json!({
            "match_phrase": { field.name(): text }
        }),
        SearchQuery::Bool {
            must,
            should,
            must_not,
        } => {
            let mut body = Map::new();
            for (key, clauses) in [("must", must), ("should", should), ("must_not", must_not)] {
                if !clauses.is_empty() {
                    body.insert(key.into(), Value::Array(clauses.iter().map(to_dsl).collect()));
                }
            }
            if must.is_empty() && !should.is_empty() {
                body.insert("minimum_should_match".into(), json!(1));
            }
            json!({ "bool": body })
        }
    }
}

/// Search request body with an exact hit total.
pub fn search_body(query: &SearchQuery, size: usize) -> Value {
    json!({
        "query": to_dsl(query),
        "size": size,
        "track_total_hits": true,
    })
}

/// Index settings and mappings for a record index.
pub fn index_definition(max_results: usize) -> Value {
    let mut properties = Map::new();
    for field in logsift_core::query::RecordField::ALL {
        properties.insert(field.name().into(), json!({ "type": "text" }));
    }
    json!({
        "settings": { "index": { "max_result_window": max_results } },
        "mappings": { "properties": properties },
    })
}
