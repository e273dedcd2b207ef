//! Synchronous execution of one invocation against one instance.

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};
use std::time::Instant;

use crate::env::pinned_vars;
use crate::error::ExecError;
use crate::instance::ToolInstance;
use crate::invocation::Invocation;
use crate::result::CapturedResult;
use crate::Result;

impl ToolInstance {
    /// Run `invocation` with the pinned environment and `date` as both
    /// author and committer date. Blocks until the tool exits.
    ///
    /// A nonzero exit is returned as data. Only a launch or I/O failure on
    /// the harness side produces an error.
    pub fn run(&self, invocation: &Invocation, date: &str) -> Result<CapturedResult> {
        let mut cmd = self.build_command(invocation, date);
        let command = format!("{} {}", self.executable().display(), invocation.display());

        let started = Instant::now();
        let output = match invocation.input() {
            None => cmd
                .stdin(Stdio::null())
                .output()
                .map_err(|source| self.launch_error(source))?,
            Some(input) => {
                cmd.stdin(Stdio::piped())
                    .stdout(Stdio::piped())
                    .stderr(Stdio::piped());
                let mut child = cmd.spawn().map_err(|source| self.launch_error(source))?;
                // A tool may exit without draining its input; the exit
                // status is still the result.
                let write_err = child
                    .stdin
                    .take()
                    .and_then(|mut stdin| stdin.write_all(input).err())
                    .filter(|e| e.kind() != ErrorKind::BrokenPipe);
                let output = child.wait_with_output().map_err(|source| ExecError::Wait {
                    command: command.clone(),
                    source,
                })?;
                if let Some(source) = write_err {
                    return Err(ExecError::Stdin { command, source });
                }
                output
            }
        };
        let duration = started.elapsed();

        let result = CapturedResult {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(128),
            duration,
        };
        tracing::debug!(
            instance = %self.label(),
            args = %invocation.display(),
            exit_code = result.exit_code,
            elapsed_ms = duration.as_millis() as u64,
            "invocation finished"
        );
        Ok(result)
    }

    fn build_command(&self, invocation: &Invocation, date: &str) -> Command {
        let mut cmd = Command::new(self.executable());
        cmd.args(invocation.arg_list());
        let dir = match invocation.subdir_path() {
            Some(sub) => self.root().join(sub),
            None => self.root(),
        };
        cmd.current_dir(dir);
        cmd.env_remove("GIT_DIR")
            .env_remove("GIT_WORK_TREE")
            .env_remove("GIT_INDEX_FILE");
        for (key, val) in pinned_vars(self.identity(), &self.home(), date) {
            cmd.env(key, val);
        }
        for (key, val) in invocation.env_overrides() {
            cmd.env(key, val);
        }
        cmd
    }

    fn launch_error(&self, source: std::io::Error) -> ExecError {
        ExecError::Launch {
            program: self.executable().to_path_buf(),
            source,
        }
    }
}
