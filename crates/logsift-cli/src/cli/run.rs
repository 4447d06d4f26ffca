use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Args;

use logsift_core::config::CliOverrides;
use logsift_pipeline::{DateWindow, PipelineInput, PipelineOutputs};
use logsift_storage::OutputLayout;

use super::{path_string, pipeline, print_written, Global};

#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Transcript CSV
    #[arg(long, short = 'i')]
    pub input: PathBuf,
    /// Newline-delimited keyword file
    #[arg(long)]
    pub keywords: Option<PathBuf>,
    /// Newline-delimited unsuccessful response phrases
    #[arg(long)]
    pub unsuccessful: Option<PathBuf>,
    /// Newline-delimited doubtful response phrases
    #[arg(long)]
    pub doubtful: Option<PathBuf>,
    /// Output directory
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,
    /// Legitimacy filter workers
    #[arg(long)]
    pub workers: Option<usize>,
    /// Index backend: memory or elasticsearch
    #[arg(long)]
    pub backend: Option<String>,
    /// First day of the reporting window (YYYY-MM-DD)
    #[arg(long, requires = "to")]
    pub from: Option<NaiveDate>,
    /// Last day of the reporting window (YYYY-MM-DD)
    #[arg(long, requires = "from")]
    pub to: Option<NaiveDate>,
    /// Skip the legitimacy filter
    #[arg(long)]
    pub no_legitimacy: bool,
}

impl RunArgs {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            legitimacy_enabled: self.no_legitimacy.then_some(false),
            legitimacy_workers: self.workers,
            index_backend: self.backend.clone(),
            keywords_path: self.keywords.as_deref().map(path_string),
            unsuccessful_phrases: self.unsuccessful.as_deref().map(path_string),
            doubtful_phrases: self.doubtful.as_deref().map(path_string),
            output_dir: self.out.as_deref().map(path_string),
            ..CliOverrides::default()
        }
    }

    pub fn window(&self) -> Result<Option<DateWindow>> {
        match (self.from, self.to) {
            (Some(from), Some(to)) => match DateWindow::new(from, to) {
                Some(window) => Ok(Some(window)),
                None => bail!("--from {from} is after --to {to}"),
            },
            _ => Ok(None),
        }
    }

    pub fn execute(self, global: &Global) -> Result<ExitCode> {
        let window = self.window()?;
        let config = global.setup(&self.overrides())?;
        let layout = OutputLayout::new(config.output.effective_dir());

        let input = PipelineInput::load(&config, &self.input)
            .with_context(|| format!("failed to load inputs from {}", self.input.display()))?
            .with_window(window);
        let outputs = pipeline(config)?.run(input).context("pipeline run failed")?;
        let written = outputs
            .persist(&layout)
            .with_context(|| format!("failed to write outputs to {}", layout.dir().display()))?;

        print_overview(&outputs);
        println!("wrote {} files to {}", written.len(), layout.dir().display());
        if global.verbose > 0 {
            print_written(&written);
        }
        Ok(ExitCode::SUCCESS)
    }
}

fn print_overview(outputs: &PipelineOutputs) {
    let summary = &outputs.summary;
    let count = |name: &str| summary.counts.get(name).copied().unwrap_or_default();
    println!("run {}", summary.run_id);
    println!(
        "  domain {} (successful {}, unsuccessful {})",
        count("domain"),
        count("domain-successful-final"),
        count("domain-unsuccessful-final")
    );
    println!(
        "  general {} (successful {}, unsuccessful {})",
        count("general"),
        count("general-successful-final"),
        count("general-unsuccessful-final")
    );
    println!(
        "  recovered pairs {}, unresolved pairs {}",
        count("recovered-pairs"),
        count("unresolved-pairs")
    );
    for point in &summary.monthly.points {
        println!("  {} {}", point.month, point.rate);
    }
    let report = outputs.report();
    if report.failure_count() + report.ambiguous_records > 0 {
        println!(
            "  degraded: {} failures, {} ambiguous records (see summary.json)",
            report.failure_count(),
            report.ambiguous_records
        );
    }
}
