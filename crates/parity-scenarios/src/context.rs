use std::collections::BTreeMap;

use parity_exec::{DateCounter, Label};

/// A value observed in both instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paired<T> {
    pub baseline: T,
    pub candidate: T,
}

impl<T> Paired<T> {
    pub fn new(baseline: T, candidate: T) -> Self {
        Self { baseline, candidate }
    }

    pub fn get(&self, label: Label) -> &T {
        match label {
            Label::Baseline => &self.baseline,
            Label::Candidate => &self.candidate,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Paired<U> {
        Paired {
            baseline: f(self.baseline),
            candidate: f(self.candidate),
        }
    }

    pub fn as_ref(&self) -> Paired<&T> {
        Paired {
            baseline: &self.baseline,
            candidate: &self.candidate,
        }
    }
}

/// State carried from one scenario to the next.
///
/// Scenarios build on each other's history. Instead of rediscovering that
/// history from the working trees, they read and update it here.
#[derive(Debug, Clone)]
pub struct ScenarioContext {
    primary_branch: String,
    current_branch: String,
    dates: DateCounter,
    commits: BTreeMap<String, Paired<String>>,
    rapid_files: usize,
    rapid_probe_interval: usize,
}

/// Default number of files created by the rapid-mutation scenario.
pub const DEFAULT_RAPID_FILES: usize = 50;
/// Default number of files created between status probes.
pub const DEFAULT_RAPID_PROBE_INTERVAL: usize = 10;

impl ScenarioContext {
    pub fn new(primary_branch: impl Into<String>) -> Self {
        let primary_branch = primary_branch.into();
        Self {
            current_branch: primary_branch.clone(),
            primary_branch,
            dates: DateCounter::new(),
            commits: BTreeMap::new(),
            rapid_files: DEFAULT_RAPID_FILES,
            rapid_probe_interval: DEFAULT_RAPID_PROBE_INTERVAL,
        }
    }

    /// Set how many files the rapid-mutation scenario creates and how
    /// often it probes status. An interval of 0 disables probing.
    pub fn with_rapid(mut self, files: usize, probe_interval: usize) -> Self {
        self.rapid_files = files;
        self.rapid_probe_interval = probe_interval;
        self
    }

    pub fn rapid_files(&self) -> usize {
        self.rapid_files
    }

    pub fn rapid_probe_interval(&self) -> usize {
        self.rapid_probe_interval
    }

    pub fn primary_branch(&self) -> &str {
        &self.primary_branch
    }

    pub fn current_branch(&self) -> &str {
        &self.current_branch
    }

    pub fn set_current_branch(&mut self, branch: impl Into<String>) {
        self.current_branch = branch.into();
    }

    /// Date for the next paired step.
    pub fn next_date(&mut self) -> String {
        self.dates.next()
    }

    /// Date of the most recent paired step, without advancing.
    pub fn current_date(&self) -> String {
        self.dates.current()
    }

    /// Remember a commit ID observed in both instances under `name`.
    pub fn remember_commit(&mut self, name: impl Into<String>, ids: Paired<String>) {
        self.commits.insert(name.into(), ids);
    }

    pub fn commit(&self, name: &str) -> Option<&Paired<String>> {
        self.commits.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_primary_branch() {
        let ctx = ScenarioContext::new("main");
        assert_eq!(ctx.primary_branch(), "main");
        assert_eq!(ctx.current_branch(), "main");
    }

    #[test]
    fn commits_are_paired_by_name() {
        let mut ctx = ScenarioContext::new("main");
        ctx.remember_commit("cherry", Paired::new("aaa".to_string(), "bbb".to_string()));
        let ids = ctx.commit("cherry").unwrap();
        assert_eq!(ids.get(Label::Baseline), "aaa");
        assert_eq!(ids.get(Label::Candidate), "bbb");
        assert!(ctx.commit("missing").is_none());
    }

    #[test]
    fn dates_advance() {
        let mut ctx = ScenarioContext::new("main");
        let first = ctx.next_date();
        let second = ctx.next_date();
        assert_ne!(first, second);
    }
}
