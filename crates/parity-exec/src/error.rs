use std::path::PathBuf;

/// Errors from preparing or launching a tool instance.
///
/// None of these describe a tool-reported failure. A nonzero exit code is
/// returned inside [`CapturedResult`](crate::CapturedResult).
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    #[error("unable to launch '{program}': {source}")]
    Launch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to collect output of '{command}': {source}")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to write stdin of '{command}': {source}")]
    Stdin {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("executable not found: {0}")]
    MissingExecutable(PathBuf),

    #[error("unable to prepare working directory '{path}': {source}")]
    Prepare {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
