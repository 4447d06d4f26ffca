//! Query model understood by every `SearchIndex` backend.
//!
//! Mirrors the subset of a full-text boolean query language the pipeline
//! needs: fuzzy `match`, exact `match_phrase`, and `bool` composition.

pub mod fuzziness;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use fuzziness::Fuzziness;

/// A named text field of a [`crate::Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordField {
    SessionId,
    Timestamp,
    IntentName,
    Event,
    UserInput,
    Response,
}

impl RecordField {
    pub const ALL: [RecordField; 6] = [
        RecordField::SessionId,
        RecordField::Timestamp,
        RecordField::IntentName,
        RecordField::Event,
        RecordField::UserInput,
        RecordField::Response,
    ];

    /// External field name, as used in CSV headers and index documents.
    pub fn name(self) -> &'static str {
        match self {
            Self::SessionId => "SessionID",
            Self::Timestamp => "Timestamp",
            Self::IntentName => "IntentName",
            Self::Event => "Event",
            Self::UserInput => "UserInput",
            Self::Response => "Response",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Term operator inside a single `Match` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// Every analyzed term must match.
    And,
    /// At least one analyzed term must match.
    Or,
}

/// Whether a keyword match selects the matching records or their complement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchMode {
    AnyOf,
    NoneOf,
}

/// A boolean full-text query.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchQuery {
    MatchAll,
    Match {
        field: RecordField,
        text: String,
        operator: Operator,
        fuzziness: Fuzziness,
    },
    MatchPhrase {
        field: RecordField,
        text: String,
    },
    Bool {
        must: Vec<SearchQuery>,
        should: Vec<SearchQuery>,
        must_not: Vec<SearchQuery>,
    },
}

impl SearchQuery {
    /// Fuzzy match requiring every term of `text` in `field`.
    pub fn match_all_terms(field: RecordField, text: impl Into<String>, fuzziness: Fuzziness) -> Self {
        Self::Match {
            field,
            text: text.into(),
            operator: Operator::And,
            fuzziness,
        }
    }

    pub fn phrase(field: RecordField, text: impl Into<String>) -> Self {
        Self::MatchPhrase {
            field,
            text: text.into(),
        }
    }

    pub fn must(clauses: Vec<SearchQuery>) -> Self {
        Self::Bool {
            must: clauses,
            should: Vec::new(),
            must_not: Vec::new(),
        }
    }

    pub fn should(clauses: Vec<SearchQuery>) -> Self {
        Self::Bool {
            must: Vec::new(),
            should: clauses,
            must_not: Vec::new(),
        }
    }

    pub fn must_not(clauses: Vec<SearchQuery>) -> Self {
        Self::Bool {
            must: Vec::new(),
            should: Vec::new(),
            must_not: clauses,
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MatchAll => "match_all",
            Self::Match { .. } => "match",
            Self::MatchPhrase { .. } => "match_phrase",
            Self::Bool { .. } => "bool",
        }
    }
}
