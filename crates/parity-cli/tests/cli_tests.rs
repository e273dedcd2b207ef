//! End-to-end tests for the `fsmon-parity` binary. Runs that need a tool use
//! the system `git` on both sides.

use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

fn bin(cwd: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_fsmon-parity"));
    cmd.current_dir(cwd)
        .env_remove("FSMON_PARITY_BASELINE")
        .env_remove("FSMON_PARITY_CANDIDATE")
        .env_remove("FSMON_PARITY_WORK_ROOT")
        .env_remove("FSMON_PARITY_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn run(cmd: &mut Command) -> Output {
    cmd.output().expect("failed to launch fsmon-parity")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

/// Run with the system git as both builds and a small rapid workload.
fn git_run(cwd: &Path, work: &Path) -> Command {
    let mut cmd = bin(cwd);
    cmd.arg("--baseline")
        .arg("git")
        .arg("--candidate")
        .arg("git")
        .arg("--work-root")
        .arg(work)
        .arg("--rapid-files")
        .arg("8");
    cmd
}

#[test]
fn list_prints_scenarios_in_order() {
    let tmp = tempfile::tempdir().unwrap();
    let out = run(bin(tmp.path()).arg("list"));
    assert!(out.status.success());
    let text = stdout(&out);
    let names: Vec<&str> = text
        .lines()
        .filter_map(|l| l.split_whitespace().next())
        .collect();
    assert_eq!(names.first(), Some(&"status"));
    assert_eq!(names.last(), Some(&"history_identity"));
    assert!(names.contains(&"rapid_file_ops"));
}

#[test]
fn normalize_reads_stdin() {
    let tmp = tempfile::tempdir().unwrap();
    let mut child = bin(tmp.path())
        .arg("normalize")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"commit 0123456789abcdef0123456789abcdef01234567\nabc1234 subject\nbranch main\n")
        .unwrap();
    let out = child.wait_with_output().unwrap();
    assert!(out.status.success());
    assert_eq!(
        stdout(&out),
        "commit <HASH>\n<SHORTHASH> subject\nbranch main\n"
    );
}

#[test]
fn normalize_reads_files() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("log.txt");
    std::fs::write(&path, "deadbee\n").unwrap();
    let out = run(bin(tmp.path()).arg("normalize").arg(&path));
    assert!(out.status.success());
    assert_eq!(stdout(&out), "<SHORTHASH>\n");
}

#[test]
fn missing_baseline_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let out = run(bin(tmp.path())
        .arg("--baseline")
        .arg(tmp.path().join("nope/git"))
        .arg("--candidate")
        .arg("git")
        .arg("--work-root")
        .arg(tmp.path().join("work")));
    assert_eq!(out.status.code(), Some(2));
    let err = stderr(&out);
    assert!(err.contains("fatal:"), "stderr: {err}");
    assert!(err.contains("run aborted"), "stderr: {err}");
    assert!(!err.contains('\x1b'), "log lines carry color codes: {err:?}");
    assert!(!stdout(&out).contains("Results:"));
}

#[test]
fn bad_flag_exits_two() {
    let tmp = tempfile::tempdir().unwrap();
    let out = run(bin(tmp.path()).arg("--no-such-flag"));
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn same_build_passes() {
    let tmp = tempfile::tempdir().unwrap();
    let out = run(&mut git_run(tmp.path(), &tmp.path().join("work")));
    let text = stdout(&out);
    assert_eq!(out.status.code(), Some(0), "stdout: {text}\nstderr: {}", stderr(&out));
    assert!(text.contains("PASS status/clean"));
    assert!(text.contains(" passed, 0 failed"));
    assert!(!text.contains("FAIL "));
    assert!(tmp.path().join("work/baseline/repo/.git").is_dir());
    assert!(tmp.path().join("work/candidate/repo/.git").is_dir());
}

/// A candidate that hides README.md from `ls-files` and refuses to merge,
/// delegating everything else to the system git.
fn diverging_candidate(dir: &Path) -> PathBuf {
    let path = dir.join("git-diverging");
    std::fs::write(
        &path,
        r#"#!/bin/sh
case "$1" in
  ls-files)
    git "$@" | grep -v '^README.md$'
    exit 0
    ;;
  merge)
    if [ "$2" = "--no-edit" ]; then
      echo "fatal: merge refused" >&2
      exit 128
    fi
    ;;
esac
exec git "$@"
"#,
    )
    .unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
fn divergence_exits_one_and_keeps_running() {
    let tmp = tempfile::tempdir().unwrap();
    let candidate = diverging_candidate(tmp.path());
    let out = run(bin(tmp.path())
        .arg("--baseline")
        .arg("git")
        .arg("--candidate")
        .arg(&candidate)
        .arg("--work-root")
        .arg(tmp.path().join("work"))
        .arg("--rapid-files")
        .arg("4"));
    let text = stdout(&out);
    assert_eq!(out.status.code(), Some(1), "stdout: {text}\nstderr: {}", stderr(&out));

    let lines: Vec<&str> = text.lines().collect();
    assert!(lines.contains(&"FAIL merge"));
    assert!(lines.contains(&"FAIL ls_files"));
    assert!(lines.contains(&"  reason: expected both to succeed, got exit code 0 vs 128"));

    let failed_at = lines
        .iter()
        .position(|l| *l == "Failed scenarios:")
        .expect("no failed scenario list");
    let failing = &lines[failed_at + 1..];
    assert!(failing.contains(&"  - merge"));
    assert!(failing.contains(&"  - ls_files"));

    // Scenarios after the failures still ran.
    assert!(lines.contains(&"PASS gc"));
    assert!(lines.contains(&"PASS cherry_pick"));
    assert!(lines.iter().any(|l| l.starts_with("Results: ") && !l.ends_with(" 0 failed")));
}

#[test]
fn run_subcommand_matches_default() {
    let tmp = tempfile::tempdir().unwrap();
    let work = tmp.path().join("work");
    let out = run(bin(tmp.path())
        .arg("run")
        .arg("--baseline")
        .arg("git")
        .arg("--candidate")
        .arg("git")
        .arg("--work-root")
        .arg(&work)
        .arg("--rapid-files")
        .arg("4"));
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    assert!(stdout(&out).contains(" passed, 0 failed"));
}

#[test]
fn report_json_is_written() {
    let tmp = tempfile::tempdir().unwrap();
    let report = tmp.path().join("report.json");
    let out = run(git_run(tmp.path(), &tmp.path().join("work"))
        .arg("--report-json")
        .arg(&report));
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["failed"], 0);
    let outcomes = json["outcomes"].as_array().unwrap();
    assert_eq!(outcomes[0]["name"], "status/clean");
    assert!(outcomes.iter().all(|o| o["passed"] == true));
    assert_eq!(json["passed"].as_u64().unwrap() as usize, outcomes.len());
}

#[test]
fn config_file_in_cwd_is_used() {
    let tmp = tempfile::tempdir().unwrap();
    let work = tmp.path().join("from-config");
    std::fs::write(
        tmp.path().join("fsmon-parity.toml"),
        format!(
            "baseline = \"git\"\ncandidate = \"git\"\nwork_root = {:?}\nrapid_files = 4\n",
            work.display().to_string()
        ),
    )
    .unwrap();
    let out = run(&mut bin(tmp.path()));
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    assert!(work.join("baseline/repo/.git").is_dir());
}

#[test]
fn flags_override_config_file() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(
        tmp.path().join("fsmon-parity.toml"),
        "baseline = \"/no/such/baseline/git\"\ncandidate = \"git\"\nrapid_files = 4\n",
    )
    .unwrap();
    let out = run(bin(tmp.path())
        .arg("--baseline")
        .arg("git")
        .arg("--work-root")
        .arg(tmp.path().join("work")));
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
}

#[test]
fn explicit_config_must_exist() {
    let tmp = tempfile::tempdir().unwrap();
    let out = run(bin(tmp.path())
        .arg("--config")
        .arg(tmp.path().join("absent.toml")));
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("cannot read config file"));
}
