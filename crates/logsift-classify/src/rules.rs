//! Relocation rules applied to resolved-unsuccessful doubtful records.
//!
//! email: query contains the masked e-mail placeholder, response mentions "Email".
//! biometric: query mentions attendance/biometric vocabulary, response mentions "AEBAS".

use logsift_core::config::ClassifyConfig;
use logsift_core::errors::ClassifyError;
use logsift_core::models::Record;
use logsift_core::text::contains_ignore_case;

use crate::phrases::PhraseList;

/// Moves a record from unsuccessful to successful when its query contains
/// one of `query_terms` and its response contains `response_marker`.
#[derive(Debug, Clone)]
pub struct RelocationRule {
    pub name: &'static str,
    pub query_terms: PhraseList,
    pub response_marker: String,
}

impl RelocationRule {
    pub fn applies(&self, record: &Record) -> bool {
        self.query_terms.is_match(&record.user_input)
            && contains_ignore_case(&record.response, &self.response_marker)
    }
}

/// The email and biometric rules, in that order.
pub fn default_rules(config: &ClassifyConfig) -> Result<Vec<RelocationRule>, ClassifyError> {
    Ok(vec![
        RelocationRule {
            name: "email",
            query_terms: PhraseList::new("email", [config.effective_masked_email()])?,
            response_marker: config.effective_email_response_marker().to_string(),
        },
        RelocationRule {
            name: "biometric",
            query_terms: PhraseList::new("biometric", config.effective_biometric_terms())?,
            response_marker: config.effective_biometric_response_marker().to_string(),
        },
    ])
}
