//! Timestamp parsing for temporal comparison.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

use logsift_core::config::RecoveryConfig;
use logsift_core::errors::RecoveryError;

/// Parses record timestamps into comparable instants.
///
/// RFC 3339 is tried first (offsets are normalised to UTC), then each
/// configured chrono format in order. A format without time fields yields
/// midnight of that date.
#[derive(Debug, Clone)]
pub struct TimestampParser {
    formats: Vec<String>,
}

impl TimestampParser {
    pub fn new(formats: impl IntoIterator<Item = String>) -> Result<Self, RecoveryError> {
        let formats: Vec<String> = formats.into_iter().collect();
        for format in &formats {
            if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
                return Err(RecoveryError::InvalidFormat {
                    format: format.clone(),
                    reason: "unrecognised strftime specifier".to_string(),
                });
            }
        }
        Ok(Self { formats })
    }

    pub fn from_config(config: &RecoveryConfig) -> Result<Self, RecoveryError> {
        Self::new(config.effective_timestamp_formats())
    }

    pub fn formats(&self) -> &[String] {
        &self.formats
    }

    /// `None` when no format accepts `raw`.
    pub fn parse(&self, raw: &str) -> Option<NaiveDateTime> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.naive_utc());
        }
        self.formats.iter().find_map(|format| {
            NaiveDateTime::parse_from_str(raw, format)
                .ok()
                .or_else(|| {
                    NaiveDate::parse_from_str(raw, format)
                        .ok()
                        .and_then(|d| d.and_hms_opt(0, 0, 0))
                })
        })
    }
}

impl Default for TimestampParser {
    fn default() -> Self {
        Self {
            formats: RecoveryConfig::default().effective_timestamp_formats(),
        }
    }
}
