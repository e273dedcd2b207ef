mod list;
mod normalize;
mod run;

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::Cli;

pub use normalize::NormalizeArgs;

#[derive(Subcommand)]
pub enum Commands {
    /// Run every scenario against both builds (the default)
    Run(RunArgs),
    /// List scenarios in execution order
    List,
    /// Print input with object ids replaced by placeholders
    Normalize(NormalizeArgs),
}

#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// Path to the baseline git executable
    #[arg(long, env = "FSMON_PARITY_BASELINE")]
    pub baseline: Option<PathBuf>,

    /// Path to the candidate git executable
    #[arg(long, env = "FSMON_PARITY_CANDIDATE")]
    pub candidate: Option<PathBuf>,

    /// Directory holding both working trees (wiped on every run)
    #[arg(long, env = "FSMON_PARITY_WORK_ROOT")]
    pub work_root: Option<PathBuf>,

    /// Branch created by init in the fixture
    #[arg(long)]
    pub primary_branch: Option<String>,

    /// Number of files written by the rapid mutation scenario
    #[arg(long)]
    pub rapid_files: Option<usize>,

    /// Maximum characters of each output shown for a failure
    #[arg(long)]
    pub excerpt_chars: Option<usize>,

    /// Also write the report as JSON to this path
    #[arg(long)]
    pub report_json: Option<PathBuf>,
}

/// Dispatch to the selected command. Returns the process exit code.
pub fn run(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Some(Commands::Run(args)) => run::run(cli, args),
        None => run::run(cli, &cli.run),
        Some(Commands::List) => list::run(),
        Some(Commands::Normalize(args)) => normalize::run(args),
    }
}
