use std::process::ExitCode;

use clap::Parser;
use logsift_cli::CliArgs;

fn main() -> anyhow::Result<ExitCode> {
    CliArgs::parse().execute()
}
