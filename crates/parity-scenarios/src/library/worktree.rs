//! Working-tree scenarios: the paths a filesystem monitor has to get right.

use crate::policy::Equivalence;
use crate::session::Session;
use crate::Result;

const STASH_MARKER: &str = "fsmon-parity-stash";

pub(super) fn status(s: &mut Session<'_>) -> Result<()> {
    s.check("status/clean", &["status", "--porcelain"], Equivalence::normalized())?;

    s.append_line("README.md", "Modified")?;
    s.check("status/modified", &["status", "--porcelain"], Equivalence::normalized())?;

    s.step(&["checkout", "--", "README.md"])?;
    Ok(())
}

pub(super) fn diff(s: &mut Session<'_>) -> Result<()> {
    s.append_line("README.md", "Diff line one")?;
    s.append_line("src/main.c", "/* diff line two */")?;

    s.check("diff/stat", &["diff", "--stat"], Equivalence::normalized())?;
    s.check("diff/name_only", &["diff", "--name-only"], Equivalence::normalized())?;

    s.step(&["checkout", "--", "."])?;
    Ok(())
}

pub(super) fn add(s: &mut Session<'_>) -> Result<()> {
    s.write_file("new_file_1.txt", "new file one\n")?;
    s.write_file("new_file_2.txt", "new file two\n")?;
    s.step(&["add", "new_file_1.txt", "new_file_2.txt"])?;

    s.check_sorted("add", &["diff", "--cached", "--name-only"], Equivalence::normalized())?;

    s.step(&["commit", "-q", "-m", "Add new files"])?;
    Ok(())
}

pub(super) fn stash(s: &mut Session<'_>) -> Result<()> {
    s.append_line("README.md", "Stashed change")?;
    s.step(&["stash", "push", "-m", STASH_MARKER])?;

    s.check("stash", &["stash", "list"], Equivalence::contains(STASH_MARKER))?;

    s.step(&["stash", "pop"])?;
    s.step(&["checkout", "--", "."])?;
    Ok(())
}

/// Create files in quick succession with status probes in between, then
/// compare how many untracked entries each instance reports.
pub(super) fn rapid_file_ops(s: &mut Session<'_>) -> Result<()> {
    let files = s.context().rapid_files();
    let interval = s.context().rapid_probe_interval();

    for i in 0..files {
        s.write_file(format!("rapid/file_{i:04}.txt"), &format!("rapid {i}\n"))?;
        if interval > 0 && (i + 1) % interval == 0 {
            s.step(&["status", "--porcelain"])?;
        }
    }

    s.check(
        "rapid_file_ops",
        &["status", "--porcelain", "--untracked-files=all"],
        Equivalence::LineCount,
    )?;

    s.remove("rapid")?;
    Ok(())
}

/// Rename a committed directory on disk. A monitor that only tracks
/// per-file events must still see every path under it move.
pub(super) fn dir_rename(s: &mut Session<'_>) -> Result<()> {
    s.write_file("rename_src/alpha.txt", "alpha\n")?;
    s.write_file("rename_src/beta.txt", "beta\n")?;
    s.write_file("rename_src/inner/gamma.txt", "gamma\n")?;
    s.step(&["add", "rename_src"])?;
    s.step(&["commit", "-q", "-m", "Add directory for rename"])?;

    s.rename("rename_src", "rename_dst")?;
    s.check(
        "dir_rename/worktree",
        &["status", "--porcelain", "--untracked-files=all"],
        Equivalence::normalized(),
    )?;

    s.step(&["add", "-A"])?;
    s.check("dir_rename/staged", &["status", "--porcelain"], Equivalence::normalized())?;

    s.step(&["commit", "-q", "-m", "Rename directory"])?;
    Ok(())
}

pub(super) fn nested_dirs(s: &mut Session<'_>) -> Result<()> {
    s.create_dir("l1/l2/l3/l4/l5")?;
    s.write_file("l1/l2/l3/l4/l5/deep.txt", "deeply nested\n")?;
    s.write_file("l1/l2/mid.txt", "midway\n")?;
    s.step(&["add", "l1"])?;
    s.step(&["commit", "-q", "-m", "Add nested directories"])?;

    s.check(
        "nested_dirs",
        &["ls-tree", "-r", "--name-only", "HEAD", "l1"],
        Equivalence::normalized(),
    )?;
    Ok(())
}
