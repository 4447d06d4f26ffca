//! The batch driver.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use logsift_classify::rules::default_rules;
use logsift_classify::{
    merge_final, CorpusPreparer, DomainOverrides, DoubtResolver, FinalSets, KeywordMatcher,
    MatchOutcome, Partitioner, PhraseList, Prefilter,
};
use logsift_core::errors::PipelineError;
use logsift_core::events::{EventDispatcher, PipelineEventHandler, RunCompletedEvent, Stage};
use logsift_core::models::{pairs_within, Category, RecordSet, RunReport};
use logsift_core::traits::{IndexBackend, LexiconPredicate};
use logsift_core::LogsiftConfig;
use logsift_lexicon::{lexicon_from_config, LegitimacyFilter, LegitimacyOutcome};
use logsift_observability::recovery_span;
use logsift_recovery::{monthly_series, RecoveryDetector, RecoverySummary, TimestampParser};

use crate::inputs::PipelineInput;
use crate::outputs::{PipelineOutputs, RecoveryResult};
use crate::stage::StageRun;
use crate::summary::{tables, DateWindow, Summary};

pub struct Pipeline {
    config: LogsiftConfig,
    backend: Arc<dyn IndexBackend>,
    lexicon: Option<Arc<dyn LexiconPredicate>>,
    events: EventDispatcher,
}

impl Pipeline {
    /// A pipeline over `backend`; the lexicon is built from config on
    /// first use unless one is supplied with [`Pipeline::with_lexicon`].
    pub fn new(config: LogsiftConfig, backend: Arc<dyn IndexBackend>) -> Self {
        Self {
            config: config.resolved(),
            backend,
            lexicon: None,
            events: EventDispatcher::new(),
        }
    }

    /// Validate `config` and build the backend it names.
    pub fn from_config(config: LogsiftConfig) -> Result<Self, PipelineError> {
        LogsiftConfig::validate(&config)?;
        let backend = logsift_index::backend_from_config(&config.index)?;
        tracing::debug!(backend = backend.kind(), "index backend ready");
        Ok(Self::new(config, backend))
    }

    pub fn with_lexicon(mut self, lexicon: Arc<dyn LexiconPredicate>) -> Self {
        self.lexicon = Some(lexicon);
        self
    }

    pub fn with_events(mut self, events: EventDispatcher) -> Self {
        self.events = events;
        self
    }

    pub fn register_handler(&mut self, handler: Arc<dyn PipelineEventHandler>) {
        self.events.register(handler);
    }

    pub fn config(&self) -> &LogsiftConfig {
        &self.config
    }

    /// Run the legitimacy filter alone.
    pub fn filter_legitimate(&self, records: &RecordSet) -> Result<LegitimacyOutcome, PipelineError> {
        let lexicon = match &self.lexicon {
            Some(lexicon) => Arc::clone(lexicon),
            None => lexicon_from_config(&self.config.legitimacy)?,
        };
        let filter = LegitimacyFilter::new(
            self.config.legitimacy.effective_workers(),
            std::time::Duration::from_millis(self.config.legitimacy.effective_lookup_timeout_ms()),
        )
        .with_events(self.events.clone());
        Ok(filter.filter(records, lexicon))
    }

    /// Run every stage over `input`.
    pub fn run(&self, input: PipelineInput) -> Result<PipelineOutputs, PipelineError> {
        let started = Instant::now();
        let mut report = RunReport::new();
        report.input_records = input.records.len();
        report.duplicate_records = input.duplicate_records;
        let _run = tracing::info_span!("logsift.run", run_id = %report.run_id).entered();
        let classify = &self.config.classify;

        StageRun::begin(&self.events, Stage::Load, input.records.len())
            .finish(&[("all", input.records.len())]);

        // Legitimacy
        let (legitimate, discarded) = if self.config.legitimacy.effective_enabled() {
            let stage = StageRun::begin(&self.events, Stage::Legitimacy, input.records.len());
            let outcome = self.filter_legitimate(&input.records)?;
            report.lexicon_failures += outcome.failed_lookups;
            report.lexicon_timeouts += outcome.timed_out_lookups;
            if outcome.failed_lookups + outcome.timed_out_lookups > 0 {
                report.warn(format!(
                    "{} lexicon lookups failed and {} timed out; those tokens counted as invalid",
                    outcome.failed_lookups, outcome.timed_out_lookups
                ));
            }
            stage.finish(&[
                ("legitimate", outcome.kept.len()),
                ("discarded", outcome.discarded.len()),
            ]);
            (outcome.kept.renamed("legitimate"), outcome.discarded.renamed("discarded"))
        } else {
            tracing::info!("legitimacy filter disabled");
            (input.records.renamed("legitimate"), RecordSet::empty("discarded"))
        };

        // Prefilter
        let stage = StageRun::begin(&self.events, Stage::Prefilter, legitimate.len());
        let prefiltered = Prefilter::from_config(&self.config.prefilter).apply(&legitimate);
        stage.finish(&[
            ("kept", prefiltered.kept.len()),
            ("removed", prefiltered.removed.len()),
        ]);

        // Keyword corpus
        let stage = StageRun::begin(&self.events, Stage::Corpus, input.keywords.len());
        let prepared = CorpusPreparer::from_config(&self.config.corpus).prepare(&input.keywords)?;
        if prepared.truncated > 0 {
            report.warn(format!(
                "keyword corpus capped at {}; {} keywords ignored",
                prepared.corpus.len(),
                prepared.truncated
            ));
        }
        stage.finish(&[("keywords", prepared.corpus.len())]);
        let corpus = prepared.corpus;

        let matcher = KeywordMatcher::new(
            self.config.index.effective_fuzziness(),
            self.config.index.effective_max_clauses(),
        )
        .with_events(self.events.clone());
        let partitioner = Partitioner::new(
            Arc::clone(&self.backend),
            matcher.clone(),
            DomainOverrides::from_config(classify),
            classify.effective_overlap_policy(),
        )
        .with_events(self.events.clone());
        let unsuccessful_phrases = PhraseList::new("unsuccessful", &input.unsuccessful_phrases)?;
        let doubtful_phrases = PhraseList::new("doubtful", &input.doubtful_phrases)?;
        if unsuccessful_phrases.is_empty() || doubtful_phrases.is_empty() {
            report.warn("a response phrase list is empty; its outcome set will be empty");
        }

        // Domain / general
        let stage = StageRun::begin(&self.events, Stage::DomainSplit, prefiltered.kept.len());
        let split = partitioner.split_domain(&prefiltered.kept, &corpus)?;
        absorb_match(&mut report, "domain split", &split.matched);
        stage.finish(&[
            ("domain", split.domain.len()),
            ("general", split.general.len()),
            ("dropped", split.dropped.len()),
        ]);

        // Outcome
        let stage = StageRun::begin(
            &self.events,
            Stage::OutcomeSplit,
            split.domain.len() + split.general.len(),
        );
        let domain_split = partitioner.split_outcome(
            Category::Domain,
            &split.domain,
            &unsuccessful_phrases,
            &doubtful_phrases,
        );
        let general_split = partitioner.split_outcome(
            Category::General,
            &split.general,
            &unsuccessful_phrases,
            &doubtful_phrases,
        );
        let ambiguous = domain_split.ambiguous.len() + general_split.ambiguous.len();
        report.ambiguous_records += ambiguous;
        if ambiguous > 0 {
            report.warn(format!(
                "{ambiguous} records matched both phrase lists; placed per overlap policy {}",
                partitioner.overlap_policy()
            ));
        }
        stage.finish(&[
            ("domain-successful", domain_split.successful.len()),
            ("domain-unsuccessful", domain_split.unsuccessful.len()),
            ("domain-doubtful", domain_split.doubtful.len()),
            ("general-successful", general_split.successful.len()),
            ("general-unsuccessful", general_split.unsuccessful.len()),
            ("general-doubtful", general_split.doubtful.len()),
        ]);

        // Doubt resolution
        let stage = StageRun::begin(
            &self.events,
            Stage::DoubtResolution,
            domain_split.doubtful.len() + general_split.doubtful.len(),
        );
        let resolver = DoubtResolver::new(
            Arc::clone(&self.backend),
            matcher.clone(),
            default_rules(classify)?,
        );
        let domain_resolution = resolver.resolve(Category::Domain, &domain_split.doubtful, &corpus)?;
        absorb_match(&mut report, "domain doubt resolution", &domain_resolution.matched);
        let general_resolution = if classify.effective_resolve_general_doubt() {
            let resolution = resolver.resolve(Category::General, &general_split.doubtful, &corpus)?;
            absorb_match(&mut report, "general doubt resolution", &resolution.matched);
            Some(resolution)
        } else {
            None
        };
        let domain_final = merge_final(&domain_split, &domain_resolution);
        let general_final = match &general_resolution {
            Some(resolution) => merge_final(&general_split, resolution),
            None => FinalSets {
                category: Category::General,
                successful: general_split.successful.renamed("general-successful-final"),
                unsuccessful: general_split.unsuccessful.renamed("general-unsuccessful-final"),
            },
        };
        stage.finish(&[
            ("domain-successful-final", domain_final.successful.len()),
            ("domain-unsuccessful-final", domain_final.unsuccessful.len()),
            ("general-successful-final", general_final.successful.len()),
            ("general-unsuccessful-final", general_final.unsuccessful.len()),
        ]);

        // Recovery
        let recovery = self.recover(
            &domain_final.unsuccessful,
            &domain_final.successful,
            input.window,
            &mut report,
        )?;

        // Final keyword filter
        let stage = StageRun::begin(&self.events, Stage::FinalFilter, domain_final.unsuccessful.len());
        let filtered = partitioner.keyword_filter(
            &domain_final.unsuccessful,
            &corpus,
            "filtered-domain-unsuccessful",
            Stage::FinalFilter,
        )?;
        absorb_match(&mut report, "final filter", &filtered);
        let filtered_domain_unsuccessful = filtered.matched;
        let filtered_recovered = pairs_within(&recovery.recovered, &filtered_domain_unsuccessful);
        stage.finish(&[
            ("filtered-domain-unsuccessful", filtered_domain_unsuccessful.len()),
            ("filtered-recovered", filtered_recovered.len()),
        ]);

        // Report
        let stage = StageRun::begin(&self.events, Stage::Report, input.records.len());
        let parser = TimestampParser::from_config(&self.config.recovery)?;
        let restrict = |set: &RecordSet| match &input.window {
            Some(window) => window.restrict(set, &parser),
            None => set.clone(),
        };
        let (all, domain, general) = (
            restrict(&input.records),
            restrict(&split.domain),
            restrict(&split.general),
        );
        let top_n = self.config.output.effective_top_n();
        let summary = Summary {
            run_id: report.run_id.clone(),
            window: input.window,
            counts: BTreeMap::new(),
            intents: tables(&all, &domain, &general, |r| r.intent_name.as_str(), top_n),
            events: tables(&all, &domain, &general, |r| r.event.as_str(), top_n),
            recovery: recovery.summary.clone(),
            monthly: recovery.monthly.clone(),
            report: RunReport::default(),
        };

        let mut outputs = PipelineOutputs {
            legitimate,
            discarded,
            prefilter_removed: prefiltered.removed,
            domain: split.domain,
            general: split.general,
            dropped: split.dropped,
            domain_split,
            general_split,
            domain_resolution,
            general_resolution,
            domain_final,
            general_final,
            recovery,
            filtered_domain_unsuccessful,
            filtered_recovered,
            summary,
        };
        let mut counts: BTreeMap<String, usize> = outputs
            .record_sets()
            .into_iter()
            .map(|(name, set)| (name.to_string(), set.len()))
            .collect();
        counts.insert("recovered-pairs".into(), outputs.recovery.recovered.len());
        counts.insert("unresolved-pairs".into(), outputs.recovery.unresolved.len());
        counts.insert("filtered-recovered-pairs".into(), outputs.filtered_recovered.len());
        outputs.summary.counts = counts;
        stage.finish(&[("sets", outputs.summary.counts.len())]);

        let duration_ms = started.elapsed().as_millis() as u64;
        tracing::info!(
            run_id = %report.run_id,
            lexicon_failures = report.lexicon_failures,
            lexicon_timeouts = report.lexicon_timeouts,
            index_failures = report.index_failures,
            truncated_queries = report.truncated_queries,
            malformed_timestamps = report.malformed_timestamps,
            ambiguous_records = report.ambiguous_records,
            "run failure counts"
        );
        self.events.emit_run_completed(&RunCompletedEvent {
            run_id: report.run_id.clone(),
            duration_ms,
            failures: report.failure_count(),
            warnings: report.warnings.len(),
        });
        outputs.summary.report = report;
        Ok(outputs)
    }

    /// Recovered and still-unresolved pairs plus the monthly series.
    ///
    /// A `window` bounds the series and the distinct-query summary; the
    /// pair lists are returned in full.
    pub fn recover(
        &self,
        unsuccessful: &RecordSet,
        successful: &RecordSet,
        window: Option<DateWindow>,
        report: &mut RunReport,
    ) -> Result<RecoveryResult, PipelineError> {
        let stage = StageRun::begin(&self.events, Stage::Recovery, unsuccessful.len());
        let detector = RecoveryDetector::new(
            Arc::clone(&self.backend),
            TimestampParser::from_config(&self.config.recovery)?,
            self.config.recovery.effective_concurrency(),
        )?
        .with_events(self.events.clone());

        let recovered = {
            let _span = recovery_span!("recovered", unsuccessful.len()).entered();
            detector.detect(unsuccessful, successful)?
        };
        let unresolved = {
            let _span = recovery_span!("unresolved", unsuccessful.len()).entered();
            detector.detect_unresolved(unsuccessful)?
        };
        for (pass, outcome) in [("recovered", &recovered), ("unresolved", &unresolved)] {
            report.index_failures += outcome.failed_queries;
            report.truncated_queries += outcome.truncated_queries;
            if outcome.failed_queries + outcome.truncated_queries > 0 {
                report.warn(format!(
                    "{pass} pass: {} phrase lookups failed, {} hit the result cap",
                    outcome.failed_queries, outcome.truncated_queries
                ));
            }
        }
        // The unresolved pass only revisits records the first pass already parsed.
        report.malformed_timestamps += recovered.malformed_timestamps;
        if recovered.malformed_timestamps > 0 {
            report.warn(format!(
                "{} records with unparsable timestamps excluded from recovery",
                recovered.malformed_timestamps
            ));
        }

        let parser = detector.parser();
        let (recovered_in, unresolved_in) = match &window {
            Some(w) => (
                w.restrict_pairs(&recovered.pairs, parser),
                w.restrict_pairs(&unresolved.pairs, parser),
            ),
            None => (recovered.pairs.clone(), unresolved.pairs.clone()),
        };
        let monthly = monthly_series(
            &recovered_in,
            &unresolved_in,
            parser,
            window.map(|w| w.months()),
        );
        let summary = RecoverySummary::from_pairs(&recovered_in, &unresolved_in);

        stage.finish(&[
            ("recovered", recovered.pairs.len()),
            ("unresolved", unresolved.pairs.len()),
        ]);
        Ok(RecoveryResult {
            recovered: recovered.pairs,
            unresolved: unresolved.pairs,
            monthly,
            summary,
        })
    }
}

fn absorb_match(report: &mut RunReport, what: &str, outcome: &MatchOutcome) {
    report.index_failures += outcome.failed_queries;
    report.truncated_queries += outcome.truncated_queries;
    if outcome.failed_queries > 0 {
        report.warn(format!(
            "{what}: {} of {} keyword queries failed and counted as no match",
            outcome.failed_queries, outcome.queries
        ));
    }
    if outcome.truncated_queries > 0 {
        report.warn(format!(
            "{what}: {} keyword queries hit the result cap; results may be incomplete",
            outcome.truncated_queries
        ));
    }
}
