//! # logsift-observability
//!
//! Subscriber setup, span macros per stage, structured event helpers, and
//! a [`TracingEventHandler`] that forwards pipeline events to the log.

pub mod handler;
pub mod tracing_setup;

pub use handler::TracingEventHandler;
pub use tracing_setup::{init_tracing, init_tracing_with_filter, LOG_ENV};
