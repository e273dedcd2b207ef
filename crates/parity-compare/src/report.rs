//! Run-scoped aggregation of scenario outcomes.

use std::io::{self, Write};
use std::time::Duration;

use parity_exec::Label;
use serde::{Serialize, Serializer};

use crate::compare::Divergence;

/// Result of one named comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioOutcome {
    pub name: String,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divergence: Option<Divergence>,
}

impl ScenarioOutcome {
    pub fn pass(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            divergence: None,
        }
    }

    pub fn fail(name: impl Into<String>, divergence: Divergence) -> Self {
        Self {
            name: name.into(),
            passed: false,
            divergence: Some(divergence),
        }
    }
}

/// Counts and failing names at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
    pub failing: Vec<String>,
}

/// Aggregate of every outcome in a run, in recording order.
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    outcomes: Vec<ScenarioOutcome>,
    passed: usize,
    failed: usize,
    failing: Vec<String>,
    #[serde(serialize_with = "millis")]
    baseline_time: Duration,
    #[serde(serialize_with = "millis")]
    candidate_time: Duration,
    #[serde(skip_serializing_if = "Option::is_none")]
    baseline_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    candidate_version: Option<String>,
}

fn millis<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a bare verdict with no diagnostic context.
    pub fn record(&mut self, name: impl Into<String>, passed: bool) {
        let name = name.into();
        self.push(ScenarioOutcome {
            name,
            passed,
            divergence: None,
        });
    }

    /// Record a full outcome.
    pub fn push(&mut self, outcome: ScenarioOutcome) {
        if outcome.passed {
            self.passed += 1;
            tracing::info!(scenario = %outcome.name, "PASS");
        } else {
            self.failed += 1;
            self.failing.push(outcome.name.clone());
            tracing::info!(scenario = %outcome.name, "FAIL");
        }
        self.outcomes.push(outcome);
    }

    /// Add tool wall-clock time for one instance.
    pub fn add_time(&mut self, label: Label, elapsed: Duration) {
        match label {
            Label::Baseline => self.baseline_time += elapsed,
            Label::Candidate => self.candidate_time += elapsed,
        }
    }

    pub fn set_version(&mut self, label: Label, version: impl Into<String>) {
        let version = Some(version.into());
        match label {
            Label::Baseline => self.baseline_version = version,
            Label::Candidate => self.candidate_version = version,
        }
    }

    pub fn outcomes(&self) -> &[ScenarioOutcome] {
        &self.outcomes
    }

    pub fn passed(&self) -> usize {
        self.passed
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn failing_names(&self) -> &[String] {
        &self.failing
    }

    pub fn time(&self, label: Label) -> Duration {
        match label {
            Label::Baseline => self.baseline_time,
            Label::Candidate => self.candidate_time,
        }
    }

    pub fn summary(&self) -> Summary {
        Summary {
            passed: self.passed,
            failed: self.failed,
            failing: self.failing.clone(),
        }
    }

    /// 0 if every outcome passed, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.failed == 0 {
            0
        } else {
            1
        }
    }

    /// Print the human-readable report.
    pub fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        if let (Some(b), Some(c)) = (&self.baseline_version, &self.candidate_version) {
            writeln!(out, "baseline:  {b}")?;
            writeln!(out, "candidate: {c}")?;
            writeln!(out)?;
        }

        for outcome in &self.outcomes {
            let tag = if outcome.passed { "PASS" } else { "FAIL" };
            writeln!(out, "{tag} {}", outcome.name)?;
            if let Some(d) = &outcome.divergence {
                writeln!(out, "  reason: {}", d.reason)?;
                if let Some(line) = d.first_differing_line {
                    writeln!(out, "  first differing line: {line}")?;
                }
                writeln!(out, "  baseline:  {:?}", d.baseline_excerpt)?;
                writeln!(out, "  candidate: {:?}", d.candidate_excerpt)?;
            }
        }

        writeln!(out)?;
        writeln!(out, "Results: {} passed, {} failed", self.passed, self.failed)?;
        if !self.failing.is_empty() {
            writeln!(out, "Failed scenarios:")?;
            for name in &self.failing {
                writeln!(out, "  - {name}")?;
            }
        }

        let base = self.baseline_time.as_secs_f64();
        let cand = self.candidate_time.as_secs_f64();
        if base > 0.0 {
            writeln!(
                out,
                "Tool time: baseline {base:.3}s, candidate {cand:.3}s ({:.2}x)",
                cand / base
            )?;
        }
        Ok(())
    }

    /// The report as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
