use std::io::{self, Write};

use anyhow::{Context, Result};
use parity_compare::RunReport;
use parity_exec::{Label, ToolInstance};
use parity_scenarios::{Harness, InstancePair};

use super::RunArgs;
use crate::config::{self, Settings};
use crate::Cli;

pub fn run(cli: &Cli, args: &RunArgs) -> Result<i32> {
    let file = config::load(cli.config.as_deref())?;
    let settings = Settings::resolve(args, file);
    tracing::info!(
        baseline = %settings.baseline.display(),
        candidate = %settings.candidate.display(),
        work_root = %settings.work_root.display(),
        "starting parity run"
    );

    let pair = InstancePair::new(
        ToolInstance::new(Label::Baseline, settings.baseline.clone(), &settings.work_root),
        ToolInstance::new(Label::Candidate, settings.candidate.clone(), &settings.work_root),
    );
    let harness = Harness::new(pair, settings.harness.clone());

    let mut report = RunReport::new();
    harness
        .run(&mut report)
        .context("parity run could not complete")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report.write_to(&mut out)?;
    out.flush()?;

    if let Some(path) = &settings.report_json {
        let json = report.to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("cannot write report to '{}'", path.display()))?;
    }

    Ok(report.exit_code())
}
