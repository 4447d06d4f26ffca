//! Partitioning and doubt-resolution configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::default_list;
use crate::constants::{
    DEFAULT_BIOMETRIC_RESPONSE_MARKER, DEFAULT_BIOMETRIC_TERMS, DEFAULT_DROPPED_TOKENS,
    DEFAULT_EMAIL_RESPONSE_MARKER, DEFAULT_FILLER_TOKENS, DEFAULT_OVERLAP_POLICY,
    DEFAULT_RESOLVE_GENERAL_DOUBT, MASKED_EMAIL,
};

/// Where a record matching both the unsuccessful and doubtful phrase lists goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapPolicy {
    /// Doubtful only.
    #[default]
    Doubtful,
    /// Unsuccessful only.
    Unsuccessful,
    /// Both sets, leaving the overlap unresolved.
    Both,
}

impl FromStr for OverlapPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "doubtful" => Ok(Self::Doubtful),
            "unsuccessful" => Ok(Self::Unsuccessful),
            "both" => Ok(Self::Both),
            other => Err(format!(
                "unknown overlap policy {other:?} (expected doubtful, unsuccessful or both)"
            )),
        }
    }
}

impl fmt::Display for OverlapPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Doubtful => "doubtful",
            Self::Unsuccessful => "unsuccessful",
            Self::Both => "both",
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ClassifyConfig {
    /// Newline-delimited phrases marking an unsuccessful response.
    pub unsuccessful_phrases: Option<String>,
    /// Newline-delimited phrases marking a doubtful response.
    pub doubtful_phrases: Option<String>,
    /// Queries moved from domain to general when equal to one of these.
    pub filler_tokens: Vec<String>,
    /// Queries dropped from general when equal to one of these.
    pub dropped_tokens: Vec<String>,
    pub masked_email: Option<String>,
    pub email_response_marker: Option<String>,
    pub biometric_response_marker: Option<String>,
    pub biometric_terms: Vec<String>,
    /// `doubtful`, `unsuccessful` or `both`. Default: doubtful.
    pub overlap_policy: Option<String>,
    /// Also resolve doubtful records of the general category. Default: true.
    pub resolve_general_doubt: Option<bool>,
}

impl ClassifyConfig {
    pub fn effective_filler_tokens(&self) -> Vec<String> {
        list_or(&self.filler_tokens, DEFAULT_FILLER_TOKENS)
    }

    pub fn effective_dropped_tokens(&self) -> Vec<String> {
        list_or(&self.dropped_tokens, DEFAULT_DROPPED_TOKENS)
    }

    pub fn effective_masked_email(&self) -> &str {
        self.masked_email.as_deref().unwrap_or(MASKED_EMAIL)
    }

    pub fn effective_email_response_marker(&self) -> &str {
        self.email_response_marker
            .as_deref()
            .unwrap_or(DEFAULT_EMAIL_RESPONSE_MARKER)
    }

    pub fn effective_biometric_response_marker(&self) -> &str {
        self.biometric_response_marker
            .as_deref()
            .unwrap_or(DEFAULT_BIOMETRIC_RESPONSE_MARKER)
    }

    pub fn effective_biometric_terms(&self) -> Vec<String> {
        list_or(&self.biometric_terms, DEFAULT_BIOMETRIC_TERMS)
    }

    pub fn effective_overlap_policy(&self) -> OverlapPolicy {
        self.overlap_policy
            .as_deref()
            .unwrap_or(DEFAULT_OVERLAP_POLICY)
            .parse()
            .unwrap_or_default()
    }

    pub fn effective_resolve_general_doubt(&self) -> bool {
        self.resolve_general_doubt
            .unwrap_or(DEFAULT_RESOLVE_GENERAL_DOUBT)
    }
}

fn list_or(values: &[String], defaults: &[&str]) -> Vec<String> {
    if values.is_empty() {
        default_list(defaults)
    } else {
        values.to_vec()
    }
}
