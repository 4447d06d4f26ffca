//! Record builders and golden-dataset loading shared by logsift tests.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use logsift_core::{Record, RecordSet};

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Walk up from whichever crate is running the test to the workspace root.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").join("golden").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// A record with only the fields classification looks at.
pub fn record(session: &str, timestamp: &str, user_input: &str, response: &str) -> Record {
    Record::new(session, timestamp, "", "", user_input, response)
}

pub fn record_set(name: &str, records: impl IntoIterator<Item = Record>) -> RecordSet {
    RecordSet::new(name, records)
}

/// Fluent builder for records that need intent or event values.
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self {
            record: Record::new("s1", "01/10/2020 10:00:00 AM", "", "", "", ""),
        }
    }

    pub fn session(mut self, session: &str) -> Self {
        self.record.session_id = session.into();
        self
    }

    pub fn at(mut self, timestamp: &str) -> Self {
        self.record.timestamp = timestamp.into();
        self
    }

    pub fn intent(mut self, intent: &str) -> Self {
        self.record.intent_name = intent.into();
        self
    }

    pub fn event(mut self, event: &str) -> Self {
        self.record.event = event.into();
        self
    }

    pub fn query(mut self, user_input: &str) -> Self {
        self.record.user_input = user_input.into();
        self
    }

    pub fn response(mut self, response: &str) -> Self {
        self.record.response = response.into();
        self
    }

    pub fn build(self) -> Record {
        self.record
    }
}

/// A small end-to-end scenario with expected outputs.
#[derive(Debug, Clone, Deserialize)]
pub struct GoldenScenario {
    pub description: String,
    pub records: Vec<Record>,
    pub keywords: Vec<String>,
    pub unsuccessful_phrases: Vec<String>,
    pub doubtful_phrases: Vec<String>,
    /// Output set name to the `UserInput` values it must hold, sorted.
    pub expected: BTreeMap<String, Vec<String>>,
    /// Month label to expected rate (`"no data"` or a number as text).
    #[serde(default)]
    pub expected_monthly: BTreeMap<String, String>,
}

/// Load `golden/<name>.json`.
pub fn load_scenario(name: &str) -> GoldenScenario {
    load_fixture(&format!("golden/{name}.json"))
}

/// Sorted `UserInput` values of a set, for comparison with golden expectations.
pub fn queries(set: &RecordSet) -> Vec<String> {
    let mut out: Vec<String> = set.iter().map(|r| r.user_input.clone()).collect();
    out.sort();
    out
}
