//! Resolution of doubtful records.
//!
//! A doubtful record counts as successful when a corpus keyword matches its
//! query and its response jointly. The remainder is unsuccessful, except
//! for records relocated by the [`RelocationRule`]s.

use std::sync::Arc;

use logsift_core::errors::ClassifyError;
use logsift_core::events::Stage;
use logsift_core::models::{Category, KeywordCorpus, RecordSet};
use logsift_core::query::{MatchMode, RecordField};
use logsift_core::traits::IndexBackend;

use crate::matcher::{KeywordMatcher, MatchOutcome};
use crate::partitioner::OutcomeSplit;
use crate::rules::RelocationRule;

#[derive(Debug, Clone)]
pub struct DoubtResolution {
    pub resolved_success: RecordSet,
    pub resolved_unsuccess: RecordSet,
    pub matched: MatchOutcome,
    /// Records moved by each rule, in rule order.
    pub relocated: Vec<(&'static str, usize)>,
}

pub struct DoubtResolver {
    backend: Arc<dyn IndexBackend>,
    matcher: KeywordMatcher,
    rules: Vec<RelocationRule>,
}

impl DoubtResolver {
    pub fn new(
        backend: Arc<dyn IndexBackend>,
        matcher: KeywordMatcher,
        rules: Vec<RelocationRule>,
    ) -> Self {
        Self {
            backend,
            matcher,
            rules,
        }
    }

    pub fn resolve(
        &self,
        category: Category,
        doubtful: &RecordSet,
        corpus: &KeywordCorpus,
    ) -> Result<DoubtResolution, ClassifyError> {
        let success_name = format!("{category}-doubt-successful");
        let unsuccess_name = format!("{category}-doubt-unsuccessful");

        let index = self
            .backend
            .open(doubtful.name(), doubtful)
            .map_err(|source| ClassifyError::IndexUnavailable {
                set: doubtful.name().to_string(),
                source,
            })?;
        let matched = self.matcher.run(
            index.as_ref(),
            doubtful,
            corpus,
            &[RecordField::UserInput, RecordField::Response],
            MatchMode::AnyOf,
            &success_name,
            Stage::DoubtResolution,
        );

        let mut success = matched.matched.clone();
        let mut unsuccess = doubtful.difference(&success, &unsuccess_name);
        let mut relocated = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            let (moved, rest) = unsuccess.partition(rule.name, &unsuccess_name, |r| rule.applies(r));
            tracing::debug!(category = %category, rule = rule.name, moved = moved.len(), "relocation rule applied");
            success = success.union(&moved, &success_name);
            unsuccess = rest;
            relocated.push((rule.name, moved.len()));
        }

        Ok(DoubtResolution {
            resolved_success: success,
            resolved_unsuccess: unsuccess,
            matched,
            relocated,
        })
    }
}

/// Final successful and unsuccessful sets of one category.
#[derive(Debug, Clone)]
pub struct FinalSets {
    pub category: Category,
    pub successful: RecordSet,
    pub unsuccessful: RecordSet,
}

/// Fold a doubt resolution into the outcome split it came from.
pub fn merge_final(split: &OutcomeSplit, resolution: &DoubtResolution) -> FinalSets {
    let category = split.category;
    FinalSets {
        category,
        successful: split
            .successful
            .union(&resolution.resolved_success, format!("{category}-successful-final")),
        unsuccessful: split
            .unsuccessful
            .union(&resolution.resolved_unsuccess, format!("{category}-unsuccessful-final")),
    }
}
