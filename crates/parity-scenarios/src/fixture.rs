//! Deterministic starting repository.
//!
//! Both instances get the same files and the same initial commit. Identity
//! and signing are configured so nothing prompts, and the pinned commit
//! date means the initial commit hashes identically in both.

use parity_exec::{Invocation, Label};

use crate::error::ScenarioError;
use crate::session::Session;
use crate::Result;

/// Files written before the initial commit, as `(path, contents)`.
pub const FIXTURE_FILES: &[(&str, &str)] = &[
    ("README.md", "# Parity fixture\n\nSample repository for output comparison.\n"),
    (".gitignore", "*.o\n*.tmp\n"),
    (
        "src/main.c",
        "#include \"util.h\"\n\nint main(void)\n{\n\treturn util_answer() == 42 ? 0 : 1;\n}\n",
    ),
    ("src/util.c", "#include \"util.h\"\n\nint util_answer(void)\n{\n\treturn 42;\n}\n"),
    ("src/util.h", "#ifndef UTIL_H\n#define UTIL_H\n\nint util_answer(void);\n\n#endif\n"),
    ("docs/guide.txt", "Guide\n=====\n\nBuild with make.\n"),
    ("docs/notes/todo.txt", "- nothing yet\n"),
];

pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit";

/// Extra `git config` entries for each instance, applied after init.
#[derive(Debug, Clone, Default)]
pub struct InstanceConfig {
    pub baseline: Vec<(String, String)>,
    pub candidate: Vec<(String, String)>,
}

impl InstanceConfig {
    pub fn get(&self, label: Label) -> &[(String, String)] {
        match label {
            Label::Baseline => &self.baseline,
            Label::Candidate => &self.candidate,
        }
    }
}

/// Build the fixture in both instances. Any failing step is fatal.
pub fn build(session: &mut Session<'_>, extra: &InstanceConfig) -> Result<()> {
    let branch = session.primary_branch();
    session.require("init", &["init", "-q", "-b", branch.as_str()])?;

    let identity = session.pair().baseline().identity().clone();
    let settings = [
        ("user.name", identity.name.as_str()),
        ("user.email", identity.email.as_str()),
        ("commit.gpgsign", "false"),
        ("tag.gpgsign", "false"),
        ("core.autocrlf", "false"),
        ("advice.detachedHead", "false"),
    ];
    for (key, value) in settings {
        session.require("config", &["config", key, value])?;
    }

    for label in [Label::Baseline, Label::Candidate] {
        let entries = extra.get(label);
        if entries.is_empty() {
            continue;
        }
        let inst = session.pair().get(label).clone();
        let date = session.context().current_date();
        for (key, value) in entries {
            tracing::info!(instance = %label, key = %key, value = %value, "applying instance config");
            let result = inst.run(&Invocation::new(["config", key, value]), &date)?;
            if !result.success() {
                return Err(ScenarioError::Fixture {
                    step: format!("config {key}"),
                    instance: label,
                    exit_code: result.exit_code,
                    output: result.combined().trim_end().to_string(),
                });
            }
        }
    }

    for (path, contents) in FIXTURE_FILES {
        session.write_file(path, contents)?;
    }
    session.require("add", &["add", "."])?;
    session.require("commit", &["commit", "-q", "-m", INITIAL_COMMIT_MESSAGE])?;

    let head = session.capture(&["rev-parse", "HEAD"])?;
    tracing::info!(baseline = %head.baseline, candidate = %head.candidate, "fixture committed");
    session.context_mut().remember_commit("initial", head);
    Ok(())
}
