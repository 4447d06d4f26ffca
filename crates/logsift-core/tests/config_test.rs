//! Tests for the layered configuration.

use std::sync::Mutex;

use logsift_core::config::{CliOverrides, LogsiftConfig, OverlapPolicy};
use logsift_core::errors::{ConfigError, LogsiftErrorCode};
use logsift_core::query::Fuzziness;

/// Serializes tests that touch environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const ENV_KEYS: &[&str] = &[
    "LOGSIFT_LEGITIMACY_ENABLED",
    "LOGSIFT_LEGITIMACY_WORKERS",
    "LOGSIFT_LEGITIMACY_TIMEOUT_MS",
    "LOGSIFT_LEXICON",
    "LOGSIFT_INDEX_BACKEND",
    "LOGSIFT_INDEX_URL",
    "LOGSIFT_INDEX_FUZZINESS",
    "LOGSIFT_INDEX_MAX_RESULTS",
    "LOGSIFT_CORPUS_SOURCE",
    "LOGSIFT_RECOVERY_CONCURRENCY",
    "LOGSIFT_OUTPUT_DIR",
    "LOGSIFT_LOG_JSON",
];

fn clear_env() {
    for key in ENV_KEYS {
        std::env::remove_var(key);
    }
}

/// Points the user config layer at an empty temp home.
fn isolated_home() -> tempfile::TempDir {
    let home = tempfile::TempDir::new().unwrap();
    std::env::set_var("HOME", home.path());
    home
}

#[test]
fn cli_beats_env_beats_project() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let _home = isolated_home();

    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("logsift.toml"),
        r#"
[legitimacy]
workers = 2

[recovery]
concurrency = 3

[index]
url = "http://project:9200"
"#,
    )
    .unwrap();

    std::env::set_var("LOGSIFT_LEGITIMACY_WORKERS", "4");
    std::env::set_var("LOGSIFT_RECOVERY_CONCURRENCY", "5");

    let cli = CliOverrides {
        legitimacy_workers: Some(16),
        ..Default::default()
    };
    let config = LogsiftConfig::load(dir.path(), Some(&cli)).unwrap();

    assert_eq!(config.legitimacy.workers, Some(16));
    assert_eq!(config.recovery.concurrency, Some(5));
    assert_eq!(config.index.effective_url(), "http://project:9200");

    clear_env();
}

#[test]
fn project_beats_user_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let home = isolated_home();

    std::fs::create_dir_all(home.path().join(".logsift")).unwrap();
    std::fs::write(
        home.path().join(".logsift/config.toml"),
        "[output]\ndir = \"user-out\"\ntop_n = 3\n",
    )
    .unwrap();

    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("logsift.toml"), "[output]\ndir = \"project-out\"\n").unwrap();

    let config = LogsiftConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.output.effective_dir(), "project-out");
    assert_eq!(config.output.effective_top_n(), 3);
}

#[test]
fn missing_files_fall_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let _home = isolated_home();

    let dir = tempfile::TempDir::new().unwrap();
    let config = LogsiftConfig::load(dir.path(), None).unwrap();

    assert_eq!(config.legitimacy.effective_workers(), 8);
    assert_eq!(config.index.effective_max_results(), 45_000);
    assert_eq!(config.corpus.effective_max_keywords(), 3_000);
    assert_eq!(config.index.effective_fuzziness(), Fuzziness::Auto { low: 3, high: 6 });
    assert_eq!(config.classify.effective_overlap_policy(), OverlapPolicy::Doubtful);
    assert!(config.classify.effective_resolve_general_doubt());
    assert_eq!(config.prefilter.effective_excluded_intents(), vec!["Ticket_Generated"]);
}

#[test]
fn explicit_config_file_must_exist() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let _home = isolated_home();

    let dir = tempfile::TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");
    let err = LogsiftConfig::load_with_file(dir.path(), Some(&missing), None).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}

#[test]
fn unparsable_env_value_is_ignored() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let _home = isolated_home();

    std::env::set_var("LOGSIFT_LEGITIMACY_WORKERS", "many");
    let dir = tempfile::TempDir::new().unwrap();
    let config = LogsiftConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.legitimacy.workers, None);
    clear_env();
}

#[test]
fn validation_rejects_bad_values() {
    for toml in [
        "[legitimacy]\nworkers = 0",
        "[recovery]\nconcurrency = 0",
        "[index]\nmax_results = 0",
        "[index]\nfuzziness = \"lots\"",
        "[index]\nbackend = \"solr\"",
        "[legitimacy]\nlexicon = \"wordlist\"",
        "[classify]\noverlap_policy = \"coin-flip\"",
    ] {
        let config = LogsiftConfig::from_toml(toml).unwrap();
        let err = LogsiftConfig::validate(&config).unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR", "{toml}");
        assert!(matches!(err, ConfigError::ValidationFailed { .. }), "{toml}");
    }
}

#[test]
fn unknown_keys_are_ignored() {
    let config = LogsiftConfig::from_toml("[index]\nshards = 4\nfuzziness = \"1\"\n").unwrap();
    assert_eq!(config.index.effective_fuzziness(), Fuzziness::Edits(1));
}

#[test]
fn resolved_config_round_trips_through_toml() {
    let config = LogsiftConfig::from_toml("[index]\nfuzziness = \"AUTO:2,5\"\n").unwrap();
    let rendered = config.resolved().to_toml().unwrap();
    assert!(rendered.contains("fuzziness = \"AUTO:2,5\""));
    assert!(rendered.contains("max_results = 45000"));

    let reparsed = LogsiftConfig::from_toml(&rendered).unwrap();
    LogsiftConfig::validate(&reparsed).unwrap();
    assert_eq!(reparsed.index.effective_fuzziness(), Fuzziness::Auto { low: 2, high: 5 });
}
