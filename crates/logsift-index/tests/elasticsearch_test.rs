//! Tests for the Elasticsearch query translation and transport failure handling.

use std::time::Duration;

use serde_json::json;

use logsift_core::errors::{IndexError, LogsiftErrorCode};
use logsift_core::query::{Fuzziness, RecordField, SearchQuery};
use logsift_index::elasticsearch::dsl::{index_definition, search_body, to_dsl};
use logsift_index::{HttpTransport, TransportConfig};

#[test]
fn match_translates_with_operator_and_fuzziness() {
    let q = SearchQuery::match_all_terms(RecordField::UserInput, "leave balance", Fuzziness::default());
    assert_eq!(
        to_dsl(&q),
        json!({"match": {"UserInput": {"query": "leave balance", "operator": "and", "fuzziness": "AUTO"}}})
    );
}

#[test]
fn should_only_bool_requires_one_clause() {
    let q = SearchQuery::should(vec![SearchQuery::phrase(RecordField::Response, "sorry")]);
    assert_eq!(
        to_dsl(&q),
        json!({"bool": {"should": [{"match_phrase": {"Response": "sorry"}}], "minimum_should_match": 1}})
    );
}

#[test]
fn search_body_tracks_totals() {
    let body = search_body(&SearchQuery::MatchAll, 45_000);
    assert_eq!(body["size"], 45_000);
    assert_eq!(body["track_total_hits"], true);
    assert_eq!(index_definition(45_000)["settings"]["index"]["max_result_window"], 45_000);
}

#[test]
fn unreachable_service_is_reported_after_retries() {
    let transport = HttpTransport::new(TransportConfig {
        base_url: "http://127.0.0.1:1".into(),
        timeout: Duration::from_millis(200),
        max_retries: 1,
        initial_backoff: Duration::from_millis(1),
        max_backoff: Duration::from_millis(1),
    })
    .unwrap();
    let err = transport
        .send(reqwest::Method::GET, "/_cluster/health", None, "health")
        .unwrap_err();
    assert!(matches!(err, IndexError::Unreachable { .. }));
    assert_eq!(err.error_code(), "INDEX_UNREACHABLE");
}

#[test]
fn single_attempt_is_reported_when_retries_are_off() {
    let transport = HttpTransport::new(TransportConfig {
        base_url: "http://127.0.0.1:1".into(),
        timeout: Duration::from_millis(200),
        max_retries: 0,
        initial_backoff: Duration::from_millis(1),
        max_backoff: Duration::from_millis(1),
    })
    .unwrap();
    let err = transport
        .send(reqwest::Method::GET, "/_cluster/health", None, "health")
        .unwrap_err();
    let IndexError::Unreachable { reason, .. } = err else {
        panic!("expected an unreachable error");
    };
    assert!(reason.starts_with("gave up after 1 attempts"), "{reason}");
}
