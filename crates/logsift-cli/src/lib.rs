//! # logsift-cli
//!
//! Argument parsing and command execution behind the `logsift` binary.

pub mod cli;

pub use cli::{CliArgs, RootSubcommand};
