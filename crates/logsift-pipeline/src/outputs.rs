//! Everything a run produces, and writing it to the output directory.

use std::path::PathBuf;

use logsift_classify::{DoubtResolution, FinalSets, OutcomeSplit};
use logsift_core::errors::StorageError;
use logsift_core::models::{MonthlyRecoverySeries, RecordSet, RecoveryPair, RunReport};
use logsift_recovery::RecoverySummary;
use logsift_storage::layout::{
    FILTERED_RECOVERED_PAIRS, MONTHLY_RECOVERY, RECOVERED_PAIRS, SUMMARY, UNRESOLVED_PAIRS,
};
use logsift_storage::{write_json, write_monthly, write_pairs, write_records, OutputLayout};

use crate::summary::Summary;

/// Recovered and still-unresolved pairs with their monthly aggregation.
#[derive(Debug, Clone)]
pub struct RecoveryResult {
    pub recovered: Vec<RecoveryPair>,
    pub unresolved: Vec<RecoveryPair>,
    pub monthly: MonthlyRecoverySeries,
    pub summary: RecoverySummary,
}

#[derive(Debug, Clone)]
pub struct PipelineOutputs {
    pub legitimate: RecordSet,
    pub discarded: RecordSet,
    pub prefilter_removed: RecordSet,
    pub domain: RecordSet,
    pub general: RecordSet,
    pub dropped: RecordSet,
    pub domain_split: OutcomeSplit,
    pub general_split: OutcomeSplit,
    pub domain_resolution: DoubtResolution,
    /// `None` when general doubtful records are left unresolved.
    pub general_resolution: Option<DoubtResolution>,
    pub domain_final: FinalSets,
    pub general_final: FinalSets,
    pub recovery: RecoveryResult,
    pub filtered_domain_unsuccessful: RecordSet,
    pub filtered_recovered: Vec<RecoveryPair>,
    pub summary: Summary,
}

impl PipelineOutputs {
    pub fn report(&self) -> &RunReport {
        &self.summary.report
    }

    /// Every record set with the file stem it is written under.
    pub fn record_sets(&self) -> Vec<(&'static str, &RecordSet)> {
        let mut sets = vec![
            ("legitimate", &self.legitimate),
            ("discarded", &self.discarded),
            ("prefilter-removed", &self.prefilter_removed),
            ("domain", &self.domain),
            ("general", &self.general),
            ("dropped", &self.dropped),
            ("domain-successful", &self.domain_split.successful),
            ("domain-unsuccessful", &self.domain_split.unsuccessful),
            ("domain-doubtful", &self.domain_split.doubtful),
            ("domain-ambiguous", &self.domain_split.ambiguous),
            ("general-successful", &self.general_split.successful),
            ("general-unsuccessful", &self.general_split.unsuccessful),
            ("general-doubtful", &self.general_split.doubtful),
            ("general-ambiguous", &self.general_split.ambiguous),
            ("domain-doubt-successful", &self.domain_resolution.resolved_success),
            ("domain-doubt-unsuccessful", &self.domain_resolution.resolved_unsuccess),
            ("domain-successful-final", &self.domain_final.successful),
            ("domain-unsuccessful-final", &self.domain_final.unsuccessful),
            ("general-successful-final", &self.general_final.successful),
            ("general-unsuccessful-final", &self.general_final.unsuccessful),
            ("filtered-domain-unsuccessful", &self.filtered_domain_unsuccessful),
        ];
        if let Some(resolution) = &self.general_resolution {
            sets.push(("general-doubt-successful", &resolution.resolved_success));
            sets.push(("general-doubt-unsuccessful", &resolution.resolved_unsuccess));
        }
        sets
    }

    /// Write every output under `layout`, returning the paths written.
    pub fn persist(&self, layout: &OutputLayout) -> Result<Vec<PathBuf>, StorageError> {
        layout.ensure()?;
        let mut written = Vec::new();
        for (stem, set) in self.record_sets() {
            let path = layout.record_set(stem);
            write_records(&path, set)?;
            written.push(path);
        }
        for (name, pairs) in [
            (RECOVERED_PAIRS, &self.recovery.recovered),
            (UNRESOLVED_PAIRS, &self.recovery.unresolved),
            (FILTERED_RECOVERED_PAIRS, &self.filtered_recovered),
        ] {
            let path = layout.file(name);
            write_pairs(&path, pairs)?;
            written.push(path);
        }
        let monthly = layout.file(MONTHLY_RECOVERY);
        write_monthly(&monthly, &self.recovery.monthly)?;
        written.push(monthly);
        let summary = layout.file(SUMMARY);
        write_json(&summary, &self.summary)?;
        written.push(summary);

        tracing::info!(dir = %layout.dir().display(), files = written.len(), "outputs written");
        Ok(written)
    }
}

impl RecoveryResult {
    pub fn persist(&self, layout: &OutputLayout) -> Result<Vec<PathBuf>, StorageError> {
        layout.ensure()?;
        let recovered = layout.file(RECOVERED_PAIRS);
        write_pairs(&recovered, &self.recovered)?;
        let unresolved = layout.file(UNRESOLVED_PAIRS);
        write_pairs(&unresolved, &self.unresolved)?;
        let monthly = layout.file(MONTHLY_RECOVERY);
        write_monthly(&monthly, &self.monthly)?;
        let summary = layout.file(SUMMARY);
        write_json(&summary, &self.summary)?;
        Ok(vec![recovered, unresolved, monthly, summary])
    }
}
