//! Paired execution.
//!
//! A [`Session`] is the only way scenarios touch the instances. Each
//! method applies one tool invocation or one filesystem mutation to the
//! baseline and then the candidate, with the same arguments and the same
//! pinned date.

use std::path::Path;

use parity_compare::{Comparator, RunReport, ScenarioOutcome, Verdict};
use parity_exec::{CapturedResult, Invocation, Label, ToolInstance};

use crate::context::{Paired, ScenarioContext};
use crate::error::ScenarioError;
use crate::pair::InstancePair;
use crate::policy::Equivalence;
use crate::Result;

pub struct Session<'r> {
    pair: &'r InstancePair,
    report: &'r mut RunReport,
    comparator: Comparator,
    ctx: ScenarioContext,
}

impl<'r> Session<'r> {
    pub fn new(
        pair: &'r InstancePair,
        report: &'r mut RunReport,
        comparator: Comparator,
        ctx: ScenarioContext,
    ) -> Self {
        Self {
            pair,
            report,
            comparator,
            ctx,
        }
    }

    pub fn pair(&self) -> &InstancePair {
        self.pair
    }

    pub fn context(&self) -> &ScenarioContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut ScenarioContext {
        &mut self.ctx
    }

    pub fn report(&self) -> &RunReport {
        &*self.report
    }

    pub fn primary_branch(&self) -> String {
        self.ctx.primary_branch().to_string()
    }

    // ──────────────────────────── Tool invocations ────────────────────────────

    /// Run a per-instance step against both instances with one shared date.
    ///
    /// This is the paired-execution primitive; everything else is built on
    /// it. The closure receives each instance in turn and must apply the
    /// same operation to both.
    pub fn run_paired<F>(&mut self, mut step: F) -> Result<Paired<CapturedResult>>
    where
        F: FnMut(&ToolInstance, &str) -> parity_exec::Result<CapturedResult>,
    {
        let date = self.ctx.next_date();
        let baseline = step(self.pair.baseline(), &date)?;
        let candidate = step(self.pair.candidate(), &date)?;
        self.report.add_time(Label::Baseline, baseline.duration);
        self.report.add_time(Label::Candidate, candidate.duration);
        Ok(Paired::new(baseline, candidate))
    }

    /// Run the same invocation against both instances.
    pub fn invoke(&mut self, invocation: &Invocation) -> Result<Paired<CapturedResult>> {
        self.run_paired(|inst, date| inst.run(invocation, date))
    }

    /// Setup step that is expected to succeed. A nonzero exit is logged,
    /// not fatal: the comparison that follows decides the verdict.
    pub fn step(&mut self, args: &[&str]) -> Result<Paired<CapturedResult>> {
        let invocation = Invocation::new(args);
        let results = self.invoke(&invocation)?;
        warn_on_failure(&invocation.display(), &results);
        Ok(results)
    }

    /// Per-instance setup step, for arguments that depend on values each
    /// instance reported earlier. Nonzero exits are logged.
    pub fn step_with<F>(&mut self, what: &str, step: F) -> Result<Paired<CapturedResult>>
    where
        F: FnMut(&ToolInstance, &str) -> parity_exec::Result<CapturedResult>,
    {
        let results = self.run_paired(step)?;
        warn_on_failure(what, &results);
        Ok(results)
    }

    /// Setup step that may legitimately exit nonzero.
    pub fn step_may_fail(&mut self, args: &[&str]) -> Result<Paired<CapturedResult>> {
        let invocation = Invocation::new(args);
        let results = self.invoke(&invocation)?;
        for r in [&results.baseline, &results.candidate] {
            if !r.success() {
                tracing::debug!(args = %invocation.display(), exit_code = r.exit_code, "tolerated nonzero exit");
            }
        }
        Ok(results)
    }

    /// Step that must succeed in both instances; any failure aborts the run.
    pub fn require(&mut self, what: &str, args: &[&str]) -> Result<Paired<CapturedResult>> {
        let results = self.step_may_fail(args)?;
        for (label, r) in [
            (Label::Baseline, &results.baseline),
            (Label::Candidate, &results.candidate),
        ] {
            if !r.success() {
                return Err(ScenarioError::Fixture {
                    step: what.to_string(),
                    instance: label,
                    exit_code: r.exit_code,
                    output: r.combined().trim_end().to_string(),
                });
            }
        }
        Ok(results)
    }

    /// Run `args` in both instances and return trimmed stdout of each.
    pub fn capture(&mut self, args: &[&str]) -> Result<Paired<String>> {
        Ok(self.step(args)?.map(|r| r.stdout.trim().to_string()))
    }

    /// Check out `branch` in both instances and track it as current.
    pub fn checkout(&mut self, branch: &str) -> Result<()> {
        self.step(&["checkout", "-q", branch])?;
        self.ctx.set_current_branch(branch);
        Ok(())
    }

    /// Create `branch` at HEAD in both instances and check it out.
    pub fn checkout_new(&mut self, branch: &str) -> Result<()> {
        self.step(&["checkout", "-q", "-b", branch])?;
        self.ctx.set_current_branch(branch);
        Ok(())
    }

    /// Write `contents` to `rel`, stage it, and commit with `message`.
    pub fn commit_file(&mut self, rel: &str, contents: &str, message: &str) -> Result<()> {
        self.write_file(rel, contents)?;
        self.step(&["add", rel])?;
        self.step(&["commit", "-q", "-m", message])?;
        Ok(())
    }

    // ──────────────────────────── Comparisons ────────────────────────────

    /// Judge an already-captured pair and record the outcome.
    pub fn judge(&mut self, name: &str, results: &Paired<CapturedResult>, policy: &Equivalence) -> bool {
        let outcome = match policy.evaluate(&self.comparator, results) {
            Verdict::Match => ScenarioOutcome::pass(name),
            Verdict::Mismatch(divergence) => {
                tracing::warn!(scenario = name, reason = %divergence.reason, "outputs diverged");
                ScenarioOutcome::fail(name, divergence)
            }
        };
        let passed = outcome.passed;
        self.report.push(outcome);
        passed
    }

    /// Run `args` in both instances and judge the results.
    pub fn check(&mut self, name: &str, args: &[&str], policy: Equivalence) -> Result<bool> {
        let results = self.invoke(&Invocation::new(args))?;
        Ok(self.judge(name, &results, &policy))
    }

    /// Like [`check`](Self::check) with stdout lines sorted before judging.
    pub fn check_sorted(&mut self, name: &str, args: &[&str], policy: Equivalence) -> Result<bool> {
        let invocation = Invocation::new(args);
        self.check_with(name, policy, |inst, date| {
            inst.run(&invocation, date).map(CapturedResult::sorted_lines)
        })
    }

    /// Run a per-instance step in both instances and judge the results.
    pub fn check_with<F>(&mut self, name: &str, policy: Equivalence, step: F) -> Result<bool>
    where
        F: FnMut(&ToolInstance, &str) -> parity_exec::Result<CapturedResult>,
    {
        let results = self.run_paired(step)?;
        Ok(self.judge(name, &results, &policy))
    }

    // ──────────────────────────── Filesystem mutations ────────────────────────────

    /// Write `contents` to `rel` in both trees, creating parent directories.
    pub fn write_file(&self, rel: impl AsRef<Path>, contents: &str) -> Result<()> {
        self.each_path(rel.as_ref(), |path| {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, contents)
        })
    }

    /// Append `line` plus a newline to `rel` in both trees.
    pub fn append_line(&self, rel: impl AsRef<Path>, line: &str) -> Result<()> {
        use std::io::Write;
        self.each_path(rel.as_ref(), |path| {
            let mut file = std::fs::OpenOptions::new().append(true).open(path)?;
            writeln!(file, "{line}")
        })
    }

    pub fn create_dir(&self, rel: impl AsRef<Path>) -> Result<()> {
        self.each_path(rel.as_ref(), |path| std::fs::create_dir_all(path))
    }

    /// Rename `from` to `to` in both trees.
    pub fn rename(&self, from: impl AsRef<Path>, to: impl AsRef<Path>) -> Result<()> {
        let to = to.as_ref();
        for inst in self.pair.both() {
            let src = inst.path(from.as_ref());
            std::fs::rename(&src, inst.path(to))
                .map_err(|source| ScenarioError::Io { path: src, source })?;
        }
        Ok(())
    }

    /// Remove a file or directory tree from both trees.
    pub fn remove(&self, rel: impl AsRef<Path>) -> Result<()> {
        self.each_path(rel.as_ref(), |path| {
            if path.is_dir() {
                std::fs::remove_dir_all(path)
            } else {
                std::fs::remove_file(path)
            }
        })
    }

    fn each_path<F>(&self, rel: &Path, mut op: F) -> Result<()>
    where
        F: FnMut(&Path) -> std::io::Result<()>,
    {
        for inst in self.pair.both() {
            let path = inst.path(rel);
            op(&path).map_err(|source| ScenarioError::Io { path, source })?;
        }
        Ok(())
    }
}

fn warn_on_failure(what: &str, results: &Paired<CapturedResult>) {
    for (label, r) in [
        (Label::Baseline, &results.baseline),
        (Label::Candidate, &results.candidate),
    ] {
        if !r.success() {
            tracing::warn!(
                instance = %label,
                step = what,
                exit_code = r.exit_code,
                output = %r.combined().trim_end(),
                "setup step exited nonzero"
            );
        }
    }
}
