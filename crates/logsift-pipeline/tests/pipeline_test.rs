//! End-to-end runs over the in-memory index.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use logsift_core::events::{PipelineEventHandler, RunCompletedEvent, Stage, StageCompletedEvent};
use logsift_core::models::{RecordSet, RecoveryPair, RunReport};
use logsift_core::LogsiftConfig;
use logsift_index::MemoryBackend;
use logsift_lexicon::WordListLexicon;
use logsift_pipeline::{DateWindow, Pipeline, PipelineInput};
use logsift_storage::{read_records, OutputLayout};
use test_fixtures::{load_scenario, queries, GoldenScenario, RecordBuilder};

fn config_without_legitimacy() -> LogsiftConfig {
    let mut config = LogsiftConfig::default();
    config.legitimacy.enabled = Some(false);
    config.recovery.concurrency = Some(2);
    config
}

fn pipeline(config: LogsiftConfig) -> Pipeline {
    Pipeline::new(config, Arc::new(MemoryBackend::new(1_000)))
}

fn scenario_input(scenario: &GoldenScenario) -> PipelineInput {
    PipelineInput::new(
        RecordSet::new("all", scenario.records.clone()),
        scenario.keywords.clone(),
        scenario.unsuccessful_phrases.clone(),
        scenario.doubtful_phrases.clone(),
    )
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sessions(pairs: &[RecoveryPair]) -> Vec<(String, String)> {
    let mut out: Vec<(String, String)> = pairs
        .iter()
        .map(|p| (p.unsuccessful.session_id.clone(), p.followup.session_id.clone()))
        .collect();
    out.sort();
    out
}

#[derive(Default)]
struct Recorder {
    stages: Mutex<Vec<Stage>>,
    runs: AtomicUsize,
}

impl PipelineEventHandler for Recorder {
    fn on_stage_completed(&self, event: &StageCompletedEvent) {
        self.stages.lock().unwrap().push(event.stage);
    }

    fn on_run_completed(&self, _event: &RunCompletedEvent) {
        self.runs.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn golden_helpdesk_scenario() {
    let scenario = load_scenario("helpdesk_march_may");
    let outputs = pipeline(config_without_legitimacy())
        .run(scenario_input(&scenario))
        .unwrap();

    let sets = outputs.record_sets();
    for (name, expected) in &scenario.expected {
        let (_, set) = sets
            .iter()
            .find(|(stem, _)| stem == name)
            .unwrap_or_else(|| panic!("no output set named {name}"));
        assert_eq!(&queries(set), expected, "set {name}");
    }

    let rates: Vec<(String, String)> = outputs
        .recovery
        .monthly
        .points
        .iter()
        .map(|p| (p.month.label(), p.rate.to_string()))
        .collect();
    let expected: Vec<(String, String)> = ["Mar-2020", "Apr-2020", "May-2020"]
        .iter()
        .map(|m| (m.to_string(), scenario.expected_monthly[*m].clone()))
        .collect();
    assert_eq!(rates, expected);
}

#[test]
fn golden_recovery_pairs() {
    let scenario = load_scenario("helpdesk_march_may");
    let outputs = pipeline(config_without_legitimacy())
        .run(scenario_input(&scenario))
        .unwrap();

    let pair = |u: &str, f: &str| (u.to_string(), f.to_string());
    assert_eq!(
        sessions(&outputs.recovery.recovered),
        vec![pair("s1", "s2"), pair("s12", "s13")]
    );
    assert_eq!(sessions(&outputs.recovery.unresolved), vec![pair("s3", "s4")]);
    assert_eq!(outputs.filtered_recovered.len(), 2);

    assert_eq!(outputs.summary.recovery.recovered_queries, 2);
    assert_eq!(outputs.summary.recovery.unresolved_queries, 1);
    assert_eq!(outputs.summary.recovery.unresolved, vec!["salary slip".to_string()]);
}

#[test]
fn golden_doubt_relocations() {
    let scenario = load_scenario("helpdesk_march_may");
    let outputs = pipeline(config_without_legitimacy())
        .run(scenario_input(&scenario))
        .unwrap();

    assert_eq!(outputs.domain_resolution.relocated, vec![("email", 1), ("biometric", 0)]);
    let general = outputs.general_resolution.as_ref().unwrap();
    assert_eq!(general.relocated, vec![("email", 0), ("biometric", 1)]);
    assert_eq!(outputs.report().ambiguous_records, 1);
    assert_eq!(outputs.report().input_records, 13);
}

#[test]
fn partitions_cover_the_prefiltered_records() {
    let scenario = load_scenario("helpdesk_march_may");
    let outputs = pipeline(config_without_legitimacy())
        .run(scenario_input(&scenario))
        .unwrap();

    let kept = outputs.legitimate.difference(&outputs.prefilter_removed, "kept");
    let covered = outputs
        .domain
        .union(&outputs.general, "covered")
        .union(&outputs.dropped, "covered");
    assert!(covered.same_members(&kept));
    assert!(outputs.domain.intersection(&outputs.general, "x").is_empty());

    for finals in [&outputs.domain_final, &outputs.general_final] {
        assert!(finals.successful.intersection(&finals.unsuccessful, "x").is_empty());
    }
    let domain_total = outputs.domain_final.successful.len() + outputs.domain_final.unsuccessful.len();
    assert_eq!(domain_total, outputs.domain.len());
}

#[test]
fn general_doubt_left_unresolved_when_disabled() {
    let scenario = load_scenario("helpdesk_march_may");
    let mut config = config_without_legitimacy();
    config.classify.resolve_general_doubt = Some(false);
    let outputs = pipeline(config).run(scenario_input(&scenario)).unwrap();

    assert!(outputs.general_resolution.is_none());
    assert_eq!(queries(&outputs.general_final.successful), vec!["hey".to_string()]);
    assert!(outputs.general_final.unsuccessful.is_empty());
    assert_eq!(outputs.general_final.successful.name(), "general-successful-final");
    assert!(!outputs.record_sets().iter().any(|(stem, _)| *stem == "general-doubt-successful"));
}

#[test]
fn summary_counts_and_frequency_tables() {
    let scenario = load_scenario("helpdesk_march_may");
    let mut config = config_without_legitimacy();
    config.output.top_n = Some(2);
    let outputs = pipeline(config).run(scenario_input(&scenario)).unwrap();
    let summary = &outputs.summary;

    assert_eq!(summary.counts["domain"], 8);
    assert_eq!(summary.counts["general"], 3);
    assert_eq!(summary.counts["recovered-pairs"], 2);
    assert_eq!(summary.counts["unresolved-pairs"], 1);
    assert_eq!(summary.counts["filtered-recovered-pairs"], 2);

    assert_eq!(summary.intents.all.len(), 2);
    assert_eq!(summary.intents.all[0].value, "Leave");
    assert_eq!(summary.intents.all[0].count, 3);
    assert_eq!(summary.events.all[0].value, "message");
    assert_eq!(summary.run_id, outputs.report().run_id);
}

#[test]
fn window_restricts_series_and_tables_but_not_pairs() {
    let scenario = load_scenario("helpdesk_march_may");
    let window = DateWindow::new(date(2020, 3, 1), date(2020, 4, 30));
    let input = scenario_input(&scenario).with_window(window);
    let outputs = pipeline(config_without_legitimacy()).run(input).unwrap();

    let labels: Vec<String> = outputs
        .recovery
        .monthly
        .points
        .iter()
        .map(|p| format!("{}={}", p.month.label(), p.rate))
        .collect();
    assert_eq!(labels, vec!["Mar-2020=50.00", "Apr-2020=no data"]);
    assert_eq!(outputs.recovery.recovered.len(), 2);
    assert_eq!(outputs.summary.recovery.recovered_queries, 1);

    let holiday = outputs
        .summary
        .intents
        .all
        .iter()
        .find(|f| f.value == "Holiday");
    assert!(holiday.is_none());
}

#[test]
fn legitimacy_filter_discards_gibberish_queries() {
    let mut config = config_without_legitimacy();
    config.legitimacy.enabled = Some(true);
    config.legitimacy.workers = Some(2);
    let lexicon = Arc::new(WordListLexicon::from_words(["leave", "balance", "salary"]));
    let records = RecordSet::new(
        "all",
        [
            RecordBuilder::new().session("a").query("leave balance").response("4 days").build(),
            RecordBuilder::new().session("b").query("asdf qwer").response("Sorry, I did not get that").build(),
            RecordBuilder::new().session("c").query("salary zzzz").response("Here it is").build(),
        ],
    );
    let input = PipelineInput::new(
        records,
        vec!["leave balance".into(), "salary".into()],
        vec!["sorry, i did not get that".into()],
        vec!["did you mean".into()],
    );
    let outputs = pipeline(config).with_lexicon(lexicon).run(input).unwrap();

    assert_eq!(queries(&outputs.discarded), vec!["asdf qwer".to_string()]);
    assert_eq!(outputs.legitimate.len(), 2);
    assert_eq!(outputs.domain.len(), 2);
    assert!(outputs.domain_final.unsuccessful.is_empty());
}

#[test]
fn events_cover_every_stage_in_order() {
    let scenario = load_scenario("helpdesk_march_may");
    let recorder = Arc::new(Recorder::default());
    let mut pipeline = pipeline(config_without_legitimacy());
    pipeline.register_handler(recorder.clone());
    pipeline.run(scenario_input(&scenario)).unwrap();

    let stages = recorder.stages.lock().unwrap().clone();
    assert_eq!(
        stages,
        vec![
            Stage::Load,
            Stage::Prefilter,
            Stage::Corpus,
            Stage::DomainSplit,
            Stage::OutcomeSplit,
            Stage::DoubtResolution,
            Stage::Recovery,
            Stage::FinalFilter,
            Stage::Report,
        ]
    );
    assert_eq!(recorder.runs.load(Ordering::SeqCst), 1);
}

#[test]
fn empty_input_yields_empty_outputs() {
    let input = PipelineInput::new(
        RecordSet::empty("all"),
        vec!["leave balance".into()],
        vec!["sorry".into()],
        vec!["did you mean".into()],
    );
    let outputs = pipeline(config_without_legitimacy()).run(input).unwrap();

    assert!(outputs.domain.is_empty());
    assert!(outputs.general.is_empty());
    assert!(outputs.recovery.recovered.is_empty());
    assert!(outputs.recovery.monthly.is_empty());
    assert_eq!(outputs.report().failure_count(), 0);
}

#[test]
fn empty_phrase_list_is_reported() {
    let scenario = load_scenario("helpdesk_march_may");
    let mut input = scenario_input(&scenario);
    input.doubtful_phrases.clear();
    let outputs = pipeline(config_without_legitimacy()).run(input).unwrap();

    assert!(outputs.domain_split.doubtful.is_empty());
    assert!(outputs
        .report()
        .warnings
        .iter()
        .any(|w| w.contains("phrase list is empty")));
}

#[test]
fn recover_counts_malformed_timestamps_once() {
    let unsuccessful = RecordSet::new(
        "u",
        [
            RecordBuilder::new().session("u1").at("not a time").query("leave balance").build(),
            RecordBuilder::new().session("u2").at("2020-01-10").query("leave balance").build(),
        ],
    );
    let successful = RecordSet::new(
        "s",
        [RecordBuilder::new().session("s1").at("2020-01-12").query("leave balance").build()],
    );
    let mut report = RunReport::new();
    let result = pipeline(config_without_legitimacy())
        .recover(&unsuccessful, &successful, None, &mut report)
        .unwrap();

    assert_eq!(result.recovered.len(), 1);
    assert_eq!(result.recovered[0].unsuccessful.session_id, "u2");
    assert_eq!(report.malformed_timestamps, 1);
    assert_eq!(result.monthly.points[0].month.label(), "Jan-2020");
}

#[test]
fn persisted_outputs_read_back() {
    let scenario = load_scenario("helpdesk_march_may");
    let outputs = pipeline(config_without_legitimacy())
        .run(scenario_input(&scenario))
        .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let layout = OutputLayout::new(dir.path().join("out"));

    let written = outputs.persist(&layout).unwrap();
    assert!(written.iter().all(|p| p.exists()));

    let reread = read_records(&layout.record_set("domain-unsuccessful-final")).unwrap();
    let mut inputs: Vec<String> = reread.into_iter().map(|r| r.user_input).collect();
    inputs.sort();
    assert_eq!(inputs, scenario.expected["domain-unsuccessful-final"]);

    let monthly = std::fs::read_to_string(layout.file("monthly_recovery.csv")).unwrap();
    assert!(monthly.contains("Apr-2020,0,0,no data"));

    let summary: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(layout.file("summary.json")).unwrap()).unwrap();
    assert_eq!(summary["counts"]["domain"], 8);
    assert_eq!(summary["monthly"]["points"][0]["month"], "Mar-2020");
}
