//! Run driver: prepare, probe, build the fixture, then run scenarios in order.

use parity_compare::{Comparator, RunReport, DEFAULT_EXCERPT_CHARS};
use parity_exec::{DateCounter, Invocation};

use crate::context::{ScenarioContext, DEFAULT_RAPID_FILES, DEFAULT_RAPID_PROBE_INTERVAL};
use crate::error::ScenarioError;
use crate::fixture::{self, InstanceConfig};
use crate::library::{self, Scenario};
use crate::pair::InstancePair;
use crate::session::Session;
use crate::Result;

/// Knobs for one run.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub primary_branch: String,
    pub rapid_files: usize,
    pub rapid_probe_interval: usize,
    pub excerpt_chars: usize,
    pub instance_config: InstanceConfig,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            primary_branch: "main".to_string(),
            rapid_files: DEFAULT_RAPID_FILES,
            rapid_probe_interval: DEFAULT_RAPID_PROBE_INTERVAL,
            excerpt_chars: DEFAULT_EXCERPT_CHARS,
            instance_config: InstanceConfig::default(),
        }
    }
}

pub struct Harness {
    pair: InstancePair,
    config: HarnessConfig,
}

impl Harness {
    pub fn new(pair: InstancePair, config: HarnessConfig) -> Self {
        Self { pair, config }
    }

    pub fn pair(&self) -> &InstancePair {
        &self.pair
    }

    /// Run the full scenario library.
    pub fn run(&self, report: &mut RunReport) -> Result<()> {
        self.run_scenarios(&library::all(), report)
    }

    /// Run `scenarios` in order on a freshly built fixture.
    pub fn run_scenarios(&self, scenarios: &[Scenario], report: &mut RunReport) -> Result<()> {
        let mut session = self.start(report)?;
        for scenario in scenarios {
            tracing::info!(scenario = scenario.name, "running scenario");
            scenario.run(&mut session)?;
        }
        Ok(())
    }

    /// Prepare both working trees, probe the executables, and build the
    /// fixture. Returns the session positioned just after the fixture.
    pub fn start<'r>(&'r self, report: &'r mut RunReport) -> Result<Session<'r>> {
        self.pair.prepare()?;
        self.preflight(report)?;

        let ctx = ScenarioContext::new(self.config.primary_branch.clone())
            .with_rapid(self.config.rapid_files, self.config.rapid_probe_interval);
        let mut session = Session::new(&self.pair, report, Comparator::new(self.config.excerpt_chars), ctx);
        fixture::build(&mut session, &self.config.instance_config)?;
        Ok(session)
    }

    /// Run `--version` in both instances. A build that cannot even report
    /// its version is a setup error.
    pub fn preflight(&self, report: &mut RunReport) -> Result<()> {
        let date = DateCounter::new().current();
        let invocation = Invocation::new(["--version"]);
        for inst in self.pair.both() {
            let result = inst.run(&invocation, &date)?;
            if !result.success() {
                return Err(ScenarioError::Fixture {
                    step: "--version".to_string(),
                    instance: inst.label(),
                    exit_code: result.exit_code,
                    output: result.combined().trim_end().to_string(),
                });
            }
            let version = result.stdout.trim().to_string();
            tracing::info!(instance = %inst.label(), version = %version, "tool version");
            report.set_version(inst.label(), version);
        }
        Ok(())
    }
}
