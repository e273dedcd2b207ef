use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// A single request to run the tool.
///
/// Invocations are instance-agnostic: the working directory is relative to
/// the instance root, so the same value can be handed to both instances and
/// they receive byte-identical argument lists.
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    args: Vec<OsString>,
    stdin: Option<Vec<u8>>,
    subdir: Option<PathBuf>,
    env_vars: Vec<(OsString, OsString)>,
}

impl Invocation {
    /// Create an invocation with the given argument tokens.
    pub fn new(args: impl IntoIterator<Item = impl AsRef<OsStr>>) -> Self {
        Self::default().args(args)
    }

    /// Add an argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Add multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl AsRef<OsStr>>) -> Self {
        for arg in args {
            self.args.push(arg.as_ref().to_os_string());
        }
        self
    }

    /// Pipe `input` to the tool's stdin.
    pub fn stdin(mut self, input: impl Into<Vec<u8>>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// Run in a subdirectory of the instance root.
    pub fn subdir(mut self, dir: impl AsRef<Path>) -> Self {
        self.subdir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Set an extra environment variable, applied after the pinned set.
    pub fn env(mut self, key: impl AsRef<OsStr>, val: impl AsRef<OsStr>) -> Self {
        self.env_vars
            .push((key.as_ref().to_os_string(), val.as_ref().to_os_string()));
        self
    }

    pub fn arg_list(&self) -> &[OsString] {
        &self.args
    }

    pub fn input(&self) -> Option<&[u8]> {
        self.stdin.as_deref()
    }

    pub fn subdir_path(&self) -> Option<&Path> {
        self.subdir.as_deref()
    }

    pub fn env_overrides(&self) -> &[(OsString, OsString)] {
        &self.env_vars
    }

    /// Space-joined arguments for logs and error messages.
    pub fn display(&self) -> String {
        self.args
            .iter()
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
