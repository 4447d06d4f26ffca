use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;

use logsift_core::config::CliOverrides;
use logsift_core::models::RunReport;
use logsift_storage::layout::RECOVERY_REPORT;
use logsift_storage::{read_record_set, write_json, OutputLayout};

use super::{path_string, pipeline, print_written, Global};

#[derive(Debug, Clone, Default, Args)]
pub struct RecoveryArgs {
    /// Persisted unsuccessful record set (CSV)
    #[arg(long)]
    pub unsuccessful: PathBuf,
    /// Persisted successful record set (CSV)
    #[arg(long)]
    pub successful: PathBuf,
    /// Output directory
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,
    /// Concurrent phrase lookups
    #[arg(long)]
    pub concurrency: Option<usize>,
}

impl RecoveryArgs {
    pub fn execute(self, global: &Global) -> Result<ExitCode> {
        let overrides = CliOverrides {
            recovery_concurrency: self.concurrency,
            output_dir: self.out.as_deref().map(path_string),
            ..CliOverrides::default()
        };
        let config = global.setup(&overrides)?;
        let layout = OutputLayout::new(config.output.effective_dir());

        let (unsuccessful, _) = read_record_set(&self.unsuccessful, "unsuccessful")
            .with_context(|| format!("failed to read {}", self.unsuccessful.display()))?;
        let (successful, _) = read_record_set(&self.successful, "successful")
            .with_context(|| format!("failed to read {}", self.successful.display()))?;

        let mut report = RunReport::new();
        let result = pipeline(config)?.recover(&unsuccessful, &successful, None, &mut report)?;
        let mut written = result.persist(&layout)?;
        let report_path = layout.file(RECOVERY_REPORT);
        write_json(&report_path, &report)?;
        written.push(report_path);

        println!(
            "{} recovered and {} unresolved pairs over {} unsuccessful records",
            result.recovered.len(),
            result.unresolved.len(),
            unsuccessful.len()
        );
        for point in &result.monthly.points {
            println!("  {} {}", point.month, point.rate);
        }
        if global.verbose > 0 {
            print_written(&written);
        }
        Ok(ExitCode::SUCCESS)
    }
}
