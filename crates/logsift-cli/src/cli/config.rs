use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use logsift_core::config::CliOverrides;

use super::Global;

#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// Print only the layered values, without compiled defaults
    #[arg(long)]
    pub raw: bool,
}

impl ConfigArgs {
    pub fn execute(self, global: &Global) -> Result<ExitCode> {
        let config = global.setup(&CliOverrides::default())?;
        let rendered = if self.raw {
            config.to_toml()?
        } else {
            config.resolved().to_toml()?
        };
        print!("{rendered}");
        Ok(ExitCode::SUCCESS)
    }
}
