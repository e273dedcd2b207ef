//! The ordered scenario library.
//!
//! Order matters: later scenarios build on the history earlier ones
//! leave behind (commits, branches, the state of the primary branch).

mod history;
mod listing;
mod maintenance;
mod refs;
mod worktree;

use crate::session::Session;
use crate::Result;

/// A named unit of paired work.
#[derive(Clone, Copy)]
pub struct Scenario {
    pub name: &'static str,
    pub description: &'static str,
    run: fn(&mut Session<'_>) -> Result<()>,
}

impl Scenario {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        run: fn(&mut Session<'_>) -> Result<()>,
    ) -> Self {
        Self {
            name,
            description,
            run,
        }
    }

    /// Drive the scenario. Mismatches are recorded in the session's report;
    /// only fatal errors are returned.
    pub fn run(&self, session: &mut Session<'_>) -> Result<()> {
        (self.run)(session)
    }
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Every scenario, in execution order.
pub fn all() -> Vec<Scenario> {
    vec![
        Scenario::new("status", "clean and modified porcelain status", worktree::status),
        Scenario::new("diff", "diff --stat and --name-only after edits", worktree::diff),
        Scenario::new("add", "staged file set after adding new files", worktree::add),
        Scenario::new("commit", "commit count after a new commit", history::commit),
        Scenario::new("log", "commit subject sequence", history::log),
        Scenario::new("branch", "branch listing after creating branches", refs::branch),
        Scenario::new("checkout", "current branch after checkout", refs::checkout),
        Scenario::new("merge", "merge of a feature branch succeeds", history::merge),
        Scenario::new("ls_files", "sorted index listing", listing::ls_files),
        Scenario::new("ls_tree", "sorted tree listing", listing::ls_tree),
        Scenario::new("stash", "stash entry carries the label", worktree::stash),
        Scenario::new("reset", "staged set after a soft reset", history::reset),
        Scenario::new("fsck", "fsck exit code", maintenance::fsck),
        Scenario::new("gc", "gc exit code", maintenance::gc),
        Scenario::new("rapid_file_ops", "status line count under rapid file creation", worktree::rapid_file_ops),
        Scenario::new("dir_rename", "status after renaming a committed directory", worktree::dir_rename),
        Scenario::new("nested_dirs", "tree listing of a five-level directory", worktree::nested_dirs),
        Scenario::new("rebase", "rebase of a divergent branch succeeds", history::rebase),
        Scenario::new("cherry_pick", "subject after cherry-picking by commit ID", history::cherry_pick),
        Scenario::new("grep", "matching and non-matching grep", listing::grep),
        Scenario::new("history_identity", "HEAD and refs hash identically", history::identity),
    ]
}

/// Look up a scenario by name.
pub fn find(name: &str) -> Option<Scenario> {
    all().into_iter().find(|s| s.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let scenarios = all();
        let names: HashSet<_> = scenarios.iter().map(|s| s.name).collect();
        assert_eq!(names.len(), scenarios.len());
    }

    #[test]
    fn order_starts_with_status_and_ends_with_identity() {
        let scenarios = all();
        assert_eq!(scenarios.first().map(|s| s.name), Some("status"));
        assert_eq!(scenarios.last().map(|s| s.name), Some("history_identity"));
    }

    #[test]
    fn find_by_name() {
        assert!(find("cherry_pick").is_some());
        assert!(find("no_such_scenario").is_none());
    }
}
