//! Tracing setup: subscriber initialisation, span definitions, event helpers.

pub mod events;
pub mod spans;

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use logsift_core::config::LoggingConfig;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "LOGSIFT_LOG";

static INIT: Once = Once::new();

/// Initialise the global subscriber once per process.
///
/// `LOGSIFT_LOG` wins over `config.filter`; an unparsable directive falls
/// back to the configured one. Later calls are no-ops.
pub fn init_tracing(config: &LoggingConfig) {
    let fallback = config.effective_filter().to_string();
    let json = config.effective_json();
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&fallback));
        install(filter, json);
    });
}

/// Initialise with an explicit filter, ignoring the environment.
pub fn init_tracing_with_filter(filter: &str, json: bool) {
    let filter = EnvFilter::new(filter);
    INIT.call_once(|| install(filter, json));
}

fn install(filter: EnvFilter, json: bool) {
    let registry = tracing_subscriber::registry().with(filter);
    // try_init: a host process may already own the global subscriber.
    let result = if json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_names(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    if let Err(e) = result {
        eprintln!("logsift: tracing already initialised: {e}");
    }
}
