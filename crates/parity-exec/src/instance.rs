use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::env::Identity;
use crate::error::ExecError;
use crate::Result;

/// Which of the two builds an instance represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// The unmodified reference build.
    Baseline,
    /// The build carrying the filesystem-monitor optimization.
    Candidate,
}

impl Label {
    pub fn as_str(self) -> &'static str {
        match self {
            Label::Baseline => "baseline",
            Label::Candidate => "candidate",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One build of the tool together with its isolated working tree.
///
/// Layout under the instance base directory:
///
/// ```text
/// <base>/<label>/home   HOME for every invocation
/// <base>/<label>/repo   repository root, default working directory
/// ```
#[derive(Debug, Clone)]
pub struct ToolInstance {
    label: Label,
    executable: PathBuf,
    base: PathBuf,
    identity: Identity,
}

impl ToolInstance {
    /// Create an instance rooted at `work_root/<label>`.
    pub fn new(label: Label, executable: impl Into<PathBuf>, work_root: &Path) -> Self {
        Self {
            label,
            executable: executable.into(),
            base: work_root.join(label.as_str()),
            identity: Identity::default(),
        }
    }

    pub fn label(&self) -> Label {
        self.label
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Repository root; the default working directory for invocations.
    pub fn root(&self) -> PathBuf {
        self.base.join("repo")
    }

    /// Directory used as HOME for every invocation.
    pub fn home(&self) -> PathBuf {
        self.base.join("home")
    }

    /// Resolve a repository-relative path.
    pub fn path(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.root().join(rel)
    }

    /// Verify the executable exists. Launch failures are still reported by
    /// the runner; this gives a clearer message up front.
    pub fn check_executable(&self) -> Result<()> {
        if self.executable.components().count() > 1 && !self.executable.is_file() {
            return Err(ExecError::MissingExecutable(self.executable.clone()));
        }
        Ok(())
    }

    /// Destroy and recreate the instance's home and repository directories.
    pub fn prepare(&self) -> Result<()> {
        if self.base.exists() {
            std::fs::remove_dir_all(&self.base).map_err(|source| ExecError::Prepare {
                path: self.base.clone(),
                source,
            })?;
        }
        for dir in [self.home(), self.root()] {
            std::fs::create_dir_all(&dir)
                .map_err(|source| ExecError::Prepare { path: dir.clone(), source })?;
        }
        tracing::debug!(instance = %self.label, base = %self.base.display(), "prepared working tree");
        Ok(())
    }
}
