//! Single source of truth for compiled defaults.

/// logsift version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// --- Legitimacy filter ---
pub const DEFAULT_LEGITIMACY_WORKERS: usize = 8;
pub const DEFAULT_LOOKUP_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_LEXICON: &str = "wiktionary";
pub const DEFAULT_WIKTIONARY_ENDPOINT: &str = "https://en.wiktionary.org/w/api.php";

// --- Prefilter ---
pub const DEFAULT_EXCLUDED_INTENTS: &[&str] = &["Ticket_Generated"];
pub const DEFAULT_DROP_EMPTY_RESPONSE: bool = true;

// --- Index ---
pub const DEFAULT_INDEX_BACKEND: &str = "memory";
pub const DEFAULT_INDEX_URL: &str = "http://localhost:9200";
pub const DEFAULT_INDEX_PREFIX: &str = "logsift";
/// Hard ceiling on hits returned by one query.
pub const DEFAULT_MAX_RESULTS: usize = 45_000;
/// Keyword clauses per boolean query before the matcher splits into batches.
pub const DEFAULT_MAX_CLAUSES: usize = 1_000;
pub const DEFAULT_FUZZINESS: &str = "AUTO";
pub const DEFAULT_AUTO_FUZZINESS_LOW: u8 = 3;
pub const DEFAULT_AUTO_FUZZINESS_HIGH: u8 = 6;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_INITIAL_BACKOFF_MS: u64 = 500;
pub const DEFAULT_BULK_BATCH_SIZE: usize = 1_000;

// --- Keyword corpus ---
pub const DEFAULT_MAX_KEYWORDS: usize = 3_000;
pub const DEFAULT_KEYWORD_SOURCE: &str = "file";
pub const DEFAULT_KEYWORD_INDEX: &str = "keywords";
pub const DEFAULT_KEYWORD_FIELD: &str = "Attendance Marking Issue";

// --- Classification ---
/// Placeholder substituted for e-mail addresses when transcripts are anonymised.
pub const MASKED_EMAIL: &str = "abc@xyz.com";
pub const DEFAULT_FILLER_TOKENS: &[&str] = &["no", "hey", "nope"];
pub const DEFAULT_DROPPED_TOKENS: &[&str] = &["yes", "no"];
pub const DEFAULT_EMAIL_RESPONSE_MARKER: &str = "Email";
pub const DEFAULT_BIOMETRIC_RESPONSE_MARKER: &str = "AEBAS";
pub const DEFAULT_BIOMETRIC_TERMS: &[&str] = &[
    "attandence",
    "attendance",
    "attendence",
    "finger",
    "finger print",
    "fingerprint",
    "iris",
    "mark",
    "marking",
    "retina",
    "thumb",
    "ABAS",
    "AEBAS",
    "BAS",
    "aadhaar",
    "aadhar",
    "addhar",
    "adhaar",
    "adhar",
    "bio matric",
    "bio metric",
    "bio metrices",
    "bio metrics",
    "bio-metric",
    "biomatric",
    "biometric",
    "biometrices",
    "biometrics",
    "biometrix",
];
pub const DEFAULT_OVERLAP_POLICY: &str = "doubtful";
pub const DEFAULT_RESOLVE_GENERAL_DOUBT: bool = true;

// --- Recovery ---
pub const DEFAULT_RECOVERY_CONCURRENCY: usize = 8;
pub const DEFAULT_TIMESTAMP_FORMATS: &[&str] = &[
    "%m/%d/%Y %I:%M:%S %p",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d",
];

// --- Output ---
pub const DEFAULT_OUTPUT_DIR: &str = "logsift-out";
pub const DEFAULT_TOP_N: usize = 10;

// --- Logging ---
pub const DEFAULT_LOG_FILTER: &str = "logsift=info";
pub const DEFAULT_LOG_JSON: bool = false;
