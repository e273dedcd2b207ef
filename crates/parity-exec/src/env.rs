//! Pinned process environment.
//!
//! Both instances must see identical inputs, so every invocation runs with
//! a fixed identity, a fixed locale, and a commit date drawn from a shared
//! counter. With the dates pinned, commits made in lock-step hash to the
//! same object IDs in both instances.

use std::ffi::OsString;
use std::path::Path;

/// Base epoch for generated dates.
pub const BASE_EPOCH: u64 = 1_234_567_890;

/// Author and committer identity used for every invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Default for Identity {
    fn default() -> Self {
        Self {
            name: "Parity Author".to_string(),
            email: "parity@example.com".to_string(),
        }
    }
}

/// Deterministic date source. Each call to [`next`](Self::next) returns
/// `"<BASE_EPOCH + n> +0000"` for an increasing `n`.
#[derive(Debug, Clone, Default)]
pub struct DateCounter {
    counter: u64,
}

impl DateCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance and return the next date string.
    pub fn next(&mut self) -> String {
        self.counter += 1;
        format!("{} +0000", BASE_EPOCH + self.counter)
    }

    /// The most recently issued date, or the base epoch if none was issued.
    pub fn current(&self) -> String {
        format!("{} +0000", BASE_EPOCH + self.counter)
    }
}

/// Build the full set of pinned environment variables for one invocation.
pub fn pinned_vars(identity: &Identity, home: &Path, date: &str) -> Vec<(OsString, OsString)> {
    let vars: [(&str, OsString); 16] = [
        ("GIT_AUTHOR_NAME", identity.name.clone().into()),
        ("GIT_AUTHOR_EMAIL", identity.email.clone().into()),
        ("GIT_AUTHOR_DATE", date.into()),
        ("GIT_COMMITTER_NAME", identity.name.clone().into()),
        ("GIT_COMMITTER_EMAIL", identity.email.clone().into()),
        ("GIT_COMMITTER_DATE", date.into()),
        ("TZ", "UTC".into()),
        ("LC_ALL", "C".into()),
        ("LANG", "C".into()),
        ("GIT_CONFIG_NOSYSTEM", "1".into()),
        ("HOME", home.as_os_str().to_os_string()),
        ("XDG_CONFIG_HOME", home.join(".config").into_os_string()),
        ("GIT_TERMINAL_PROMPT", "0".into()),
        ("GIT_EDITOR", "true".into()),
        ("GIT_PAGER", "cat".into()),
        ("GIT_MERGE_AUTOEDIT", "no".into()),
    ];
    vars.into_iter().map(|(k, v)| (OsString::from(k), v)).collect()
}
