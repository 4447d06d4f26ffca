mod config;
mod filter;
mod recovery;
mod run;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};

use logsift_core::config::CliOverrides;
use logsift_core::LogsiftConfig;
use logsift_observability::{init_tracing, init_tracing_with_filter, TracingEventHandler};
use logsift_pipeline::Pipeline;

pub use config::ConfigArgs;
pub use filter::FilterArgs;
pub use recovery::RecoveryArgs;
pub use run::RunArgs;

#[derive(Debug, Clone, Parser)]
#[command(name = "logsift", version, about = "Classify chatbot transcripts and measure query recovery")]
pub struct CliArgs {
    #[command(subcommand)]
    pub subcommand: RootSubcommand,
    /// Config file used instead of ./logsift.toml
    #[arg(long, short = 'c', global = true, env = "LOGSIFT_CONFIG")]
    pub config: Option<PathBuf>,
    /// Increase logging verbosity
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

impl CliArgs {
    pub fn execute(self) -> Result<ExitCode> {
        let global = Global {
            config: self.config,
            verbose: self.verbose,
        };
        self.subcommand.execute(&global)
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum RootSubcommand {
    /// Run every stage and write all output sets
    Run(RunArgs),
    /// Run the legitimacy filter alone
    Filter(FilterArgs),
    /// Pair persisted unsuccessful and successful sets and aggregate monthly rates
    Recovery(RecoveryArgs),
    /// Print the effective configuration as TOML
    Config(ConfigArgs),
}

impl RootSubcommand {
    pub fn execute(self, global: &Global) -> Result<ExitCode> {
        match self {
            RootSubcommand::Run(args) => args.execute(global),
            RootSubcommand::Filter(args) => args.execute(global),
            RootSubcommand::Recovery(args) => args.execute(global),
            RootSubcommand::Config(args) => args.execute(global),
        }
    }
}

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct Global {
    pub config: Option<PathBuf>,
    pub verbose: u8,
}

impl Global {
    /// Resolve the layered config and start logging with it.
    pub fn setup(&self, overrides: &CliOverrides) -> Result<LogsiftConfig> {
        let root = std::env::current_dir().context("failed to read the working directory")?;
        let config = LogsiftConfig::load_with_file(&root, self.config.as_deref(), Some(overrides))
            .context("failed to load configuration")?;

        match self.verbose {
            0 => init_tracing(&config.logging),
            1 => init_tracing_with_filter("logsift=debug", config.logging.effective_json()),
            _ => init_tracing_with_filter("logsift=trace", config.logging.effective_json()),
        }
        tracing::debug!(
            root = %root.display(),
            config_file = ?self.config,
            backend = config.index.effective_backend(),
            "configuration loaded"
        );
        Ok(config)
    }
}

/// A pipeline over the configured backend, logging its events.
fn pipeline(config: LogsiftConfig) -> Result<Pipeline> {
    let mut pipeline = Pipeline::from_config(config).context("failed to build the pipeline")?;
    pipeline.register_handler(Arc::new(TracingEventHandler));
    Ok(pipeline)
}

fn path_string(path: &Path) -> String {
    path.display().to_string()
}

fn print_written(paths: &[PathBuf]) {
    for path in paths {
        println!("  {}", path.display());
    }
}
