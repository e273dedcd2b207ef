use std::path::PathBuf;

use parity_exec::{ExecError, Label};

/// Errors that abort a run.
///
/// Scenario mismatches are never errors; they are recorded as failed
/// outcomes and the run continues.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error("fixture step '{step}' failed in {instance} (exit {exit_code}): {output}")]
    Fixture {
        step: String,
        instance: Label,
        exit_code: i32,
        output: String,
    },

    #[error("unable to update '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
