//! Scenarios that create or rewrite history.

use parity_exec::Invocation;

use crate::policy::Equivalence;
use crate::session::Session;
use crate::Result;

pub(super) fn commit(s: &mut Session<'_>) -> Result<()> {
    s.commit_file("commit_test.txt", "commit test\n", "Commit test")?;
    s.check("commit", &["rev-list", "--count", "HEAD"], Equivalence::normalized())?;
    Ok(())
}

pub(super) fn log(s: &mut Session<'_>) -> Result<()> {
    s.check("log", &["log", "--format=%s"], Equivalence::normalized())?;
    Ok(())
}

/// Merge commit messages can carry instance-specific detail, so only
/// success is compared.
pub(super) fn merge(s: &mut Session<'_>) -> Result<()> {
    let main = s.primary_branch();

    s.checkout_new("merge-feature")?;
    s.commit_file("merge_feature.txt", "from feature\n", "Merge feature commit")?;
    s.checkout(&main)?;
    s.commit_file("merge_main.txt", "from main\n", "Merge main commit")?;

    let passed = s.check(
        "merge",
        &["merge", "--no-edit", "merge-feature"],
        Equivalence::BothSucceed,
    )?;
    if !passed {
        s.step_may_fail(&["merge", "--abort"])?;
    }
    Ok(())
}

/// Commit, soft-reset it away, and compare what is left staged.
pub(super) fn reset(s: &mut Session<'_>) -> Result<()> {
    s.commit_file("reset_test.txt", "reset test\n", "Reset test")?;
    s.step(&["reset", "--soft", "HEAD~1"])?;

    s.check_sorted("reset", &["diff", "--cached", "--name-only"], Equivalence::normalized())?;

    s.step(&["commit", "-q", "-m", "Reset test"])?;
    Ok(())
}

/// Rebase internals vary with the backend in use, so only successful
/// completion is compared.
pub(super) fn rebase(s: &mut Session<'_>) -> Result<()> {
    let main = s.primary_branch();

    s.checkout_new("rebase-topic")?;
    s.commit_file("rebase_topic.txt", "topic\n", "Rebase topic commit")?;
    s.checkout(&main)?;
    s.commit_file("rebase_main.txt", "main\n", "Rebase main commit")?;
    s.checkout("rebase-topic")?;

    let passed = s.check("rebase", &["rebase", "-q", main.as_str()], Equivalence::BothSucceed)?;
    if !passed {
        s.step_may_fail(&["rebase", "--abort"])?;
    }
    s.checkout(&main)?;
    Ok(())
}

/// Cherry-pick a side-branch commit by the ID each instance reports for
/// it, then compare the resulting tip subject.
pub(super) fn cherry_pick(s: &mut Session<'_>) -> Result<()> {
    let main = s.primary_branch();

    s.checkout_new("cherry-source")?;
    s.commit_file("cherry.txt", "cherry\n", "Cherry commit")?;
    let ids = s.capture(&["rev-parse", "HEAD"])?;
    s.context_mut().remember_commit("cherry", ids.clone());
    s.checkout(&main)?;

    s.step_with("cherry-pick", |inst, date| {
        let id = ids.get(inst.label());
        inst.run(&Invocation::new(["cherry-pick", id.as_str()]), date)
    })?;

    s.check("cherry_pick", &["log", "-1", "--format=%s"], Equivalence::normalized())?;
    Ok(())
}

/// Every commit so far was made in lock-step with pinned identity and
/// dates, so object IDs must match byte for byte.
pub(super) fn identity(s: &mut Session<'_>) -> Result<()> {
    s.check("history_identity/head", &["rev-parse", "HEAD"], Equivalence::verbatim())?;
    s.check(
        "history_identity/refs",
        &["for-each-ref", "--format=%(refname) %(objectname)", "refs/heads"],
        Equivalence::verbatim(),
    )?;
    Ok(())
}
