use std::fmt;

use serde::{Deserialize, Serialize};

use crate::query::RecordField;

/// One query/response turn extracted from a chatbot transcript.
///
/// Records are shared behind `Arc` once they enter a [`crate::RecordSet`];
/// classification moves membership between sets and never edits a record.
/// Equality and hashing cover every field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "SessionID", default)]
    pub session_id: String,
    /// Raw timestamp text. Parsed only where ordering matters.
    #[serde(rename = "Timestamp", default)]
    pub timestamp: String,
    #[serde(rename = "IntentName", default)]
    pub intent_name: String,
    #[serde(rename = "Event", default)]
    pub event: String,
    #[serde(rename = "UserInput", default)]
    pub user_input: String,
    #[serde(rename = "Response", default)]
    pub response: String,
}

impl Record {
    pub fn new(
        session_id: impl Into<String>,
        timestamp: impl Into<String>,
        intent_name: impl Into<String>,
        event: impl Into<String>,
        user_input: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            timestamp: timestamp.into(),
            intent_name: intent_name.into(),
            event: event.into(),
            user_input: user_input.into(),
            response: response.into(),
        }
    }

    /// Text of the given field.
    pub fn field(&self, field: RecordField) -> &str {
        match field {
            RecordField::SessionId => &self.session_id,
            RecordField::Timestamp => &self.timestamp,
            RecordField::IntentName => &self.intent_name,
            RecordField::Event => &self.event,
            RecordField::UserInput => &self.user_input,
            RecordField::Response => &self.response,
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} @ {}] {:?}",
            self.session_id, self.timestamp, self.user_input
        )
    }
}

/// Topical category of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Domain,
    General,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::General => "general",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
