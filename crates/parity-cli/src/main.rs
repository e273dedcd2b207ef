mod commands;
mod config;
mod logging;

use std::path::PathBuf;
use std::process;

use clap::{error::ErrorKind, Parser};

use commands::{Commands, RunArgs};

/// Exit code for a run that could not be carried out at all.
const EXIT_FATAL: i32 = 2;

#[derive(Parser)]
#[command(
    name = "fsmon-parity",
    about = "Check that a filesystem-monitor build of git prints exactly what the baseline build prints",
    version = env!("CARGO_PKG_VERSION"),
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Options for the default `run` command
    #[command(flatten)]
    run: RunArgs,

    /// Read settings from this TOML file
    #[arg(long, global = true, env = "FSMON_PARITY_CONFIG")]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Emit log lines as JSON
    #[arg(long, global = true)]
    log_json: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => process::exit(0),
                _ => process::exit(EXIT_FATAL),
            }
        }
    };

    if let Err(e) = logging::init_logging(cli.verbose, cli.quiet, cli.log_json) {
        eprintln!("warning: logging disabled: {e}");
    }

    match commands::run(&cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            tracing::error!("run aborted: {e:#}");
            eprintln!("fatal: {e:#}");
            process::exit(EXIT_FATAL);
        }
    }
}

