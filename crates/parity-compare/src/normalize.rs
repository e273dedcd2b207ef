//! Hash normalization.
//!
//! Every maximal run of hex digits that is exactly 40 characters long (a
//! full object ID) or exactly 7 characters long (an abbreviated one) is
//! replaced by a fixed placeholder. Runs of any other length are left
//! alone. Matching whole runs in a single pass means a full ID can never be
//! partially re-matched as a short one.
//!
//! Nothing else is canonicalized: listing order, timestamps, and path
//! separators pass through unchanged. Callers that need more sort or
//! rewrite their output before it gets here.

use std::fmt;
use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Replacement for a 40-character object ID.
pub const FULL_HASH_PLACEHOLDER: &str = "<HASH>";
/// Replacement for a 7-character abbreviated object ID.
pub const SHORT_HASH_PLACEHOLDER: &str = "<SHORTHASH>";

const FULL_HASH_LEN: usize = 40;
const SHORT_HASH_LEN: usize = 7;

fn hex_run() -> &'static Regex {
    static HEX_RUN: OnceLock<Regex> = OnceLock::new();
    HEX_RUN.get_or_init(|| Regex::new("[0-9a-fA-F]+").expect("hex run pattern is valid"))
}

/// Canonical form of captured text with hash tokens replaced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NormalizedText {
    fn from(text: &str) -> Self {
        normalize(text)
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Replace full and abbreviated hash tokens in `text` with placeholders.
pub fn normalize(text: &str) -> NormalizedText {
    let replaced = hex_run().replace_all(text, |caps: &Captures<'_>| {
        let run = &caps[0];
        match run.len() {
            FULL_HASH_LEN => FULL_HASH_PLACEHOLDER.to_string(),
            SHORT_HASH_LEN => SHORT_HASH_PLACEHOLDER.to_string(),
            _ => run.to_string(),
        }
    });
    NormalizedText(replaced.into_owned())
}
