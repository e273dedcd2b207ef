//! Listing scenarios. Output is sorted before comparison so only the set
//! of names matters.

use crate::policy::Equivalence;
use crate::session::Session;
use crate::Result;

pub(super) fn ls_files(s: &mut Session<'_>) -> Result<()> {
    s.check_sorted("ls_files", &["ls-files"], Equivalence::normalized())?;
    Ok(())
}

pub(super) fn ls_tree(s: &mut Session<'_>) -> Result<()> {
    s.check_sorted(
        "ls_tree",
        &["ls-tree", "-r", "--name-only", "HEAD"],
        Equivalence::normalized(),
    )?;
    Ok(())
}

/// A pattern with no match exits 1 in both; that exit code is compared as
/// data like any other.
pub(super) fn grep(s: &mut Session<'_>) -> Result<()> {
    s.check("grep/match", &["grep", "-n", "util_answer"], Equivalence::normalized())?;
    s.check(
        "grep/no_match",
        &["grep", "-n", "no-such-token-in-fixture"],
        Equivalence::normalized(),
    )?;
    Ok(())
}
