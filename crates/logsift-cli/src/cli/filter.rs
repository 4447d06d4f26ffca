use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;

use logsift_core::config::CliOverrides;
use logsift_storage::{read_record_set, write_records, OutputLayout};

use super::{path_string, pipeline, Global};

#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Transcript CSV
    #[arg(long, short = 'i')]
    pub input: PathBuf,
    /// Output directory
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,
    /// Legitimacy filter workers
    #[arg(long)]
    pub workers: Option<usize>,
}

impl FilterArgs {
    pub fn execute(self, global: &Global) -> Result<ExitCode> {
        let overrides = CliOverrides {
            legitimacy_workers: self.workers,
            output_dir: self.out.as_deref().map(path_string),
            ..CliOverrides::default()
        };
        let config = global.setup(&overrides)?;
        let layout = OutputLayout::new(config.output.effective_dir());

        let (records, duplicates) = read_record_set(&self.input, "all")
            .with_context(|| format!("failed to read {}", self.input.display()))?;
        let outcome = pipeline(config)?.filter_legitimate(&records)?;

        layout.ensure()?;
        write_records(&layout.record_set("legitimate"), &outcome.kept)?;
        write_records(&layout.record_set("discarded"), &outcome.discarded)?;

        println!(
            "kept {} of {} records ({} discarded, {} duplicates dropped)",
            outcome.kept.len(),
            records.len(),
            outcome.discarded.len(),
            duplicates
        );
        if outcome.failed_lookups + outcome.timed_out_lookups > 0 {
            println!(
                "  {} lookups failed and {} timed out; those tokens counted as invalid",
                outcome.failed_lookups, outcome.timed_out_lookups
            );
        }
        Ok(ExitCode::SUCCESS)
    }
}
