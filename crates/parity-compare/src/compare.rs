//! Pairwise comparison of captured text.

use serde::Serialize;

use crate::normalize::normalize;

/// Default length of a diagnostic excerpt, in characters.
pub const DEFAULT_EXCERPT_CHARS: usize = 200;

/// How two texts are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextPolicy {
    /// Normalize hash tokens on both sides, then require equality.
    Normalized,
    /// Require byte-for-byte equality.
    Verbatim,
}

/// Diagnostic context for a failed comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Divergence {
    /// What did not match, e.g. "output differs" or "exit code 0 vs 1".
    pub reason: String,
    /// 1-based line of the first difference in the compared text.
    pub first_differing_line: Option<usize>,
    pub baseline_excerpt: String,
    pub candidate_excerpt: String,
}

/// Outcome of a single comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Match,
    Mismatch(Divergence),
}

impl Verdict {
    pub fn is_match(&self) -> bool {
        matches!(self, Verdict::Match)
    }

    pub fn divergence(&self) -> Option<&Divergence> {
        match self {
            Verdict::Match => None,
            Verdict::Mismatch(d) => Some(d),
        }
    }
}

/// Compares baseline and candidate text and builds bounded excerpts on
/// mismatch.
#[derive(Debug, Clone, Copy)]
pub struct Comparator {
    excerpt_chars: usize,
}

impl Default for Comparator {
    fn default() -> Self {
        Self {
            excerpt_chars: DEFAULT_EXCERPT_CHARS,
        }
    }
}

impl Comparator {
    pub fn new(excerpt_chars: usize) -> Self {
        Self { excerpt_chars }
    }

    /// Compare two raw texts under `policy`. Excerpts are always taken from
    /// the raw text so the report shows what the tools actually printed.
    pub fn compare(&self, baseline: &str, candidate: &str, policy: TextPolicy) -> Verdict {
        let first_diff = match policy {
            TextPolicy::Verbatim => first_differing_line(baseline, candidate),
            TextPolicy::Normalized => {
                let b = normalize(baseline);
                let c = normalize(candidate);
                first_differing_line(b.as_str(), c.as_str())
            }
        };
        match first_diff {
            None => Verdict::Match,
            Some(line) => Verdict::Mismatch(Divergence {
                reason: "output differs".to_string(),
                first_differing_line: Some(line),
                baseline_excerpt: excerpt(baseline, self.excerpt_chars),
                candidate_excerpt: excerpt(candidate, self.excerpt_chars),
            }),
        }
    }

    /// Build a divergence for a mismatch decided elsewhere (a weak
    /// predicate, an exit-code check).
    pub fn divergence(&self, reason: impl Into<String>, baseline: &str, candidate: &str) -> Divergence {
        Divergence {
            reason: reason.into(),
            first_differing_line: None,
            baseline_excerpt: excerpt(baseline, self.excerpt_chars),
            candidate_excerpt: excerpt(candidate, self.excerpt_chars),
        }
    }
}

/// The first `max_chars` characters of `text`.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// 1-based number of the first line that differs, or `None` if the texts
/// are equal.
fn first_differing_line(a: &str, b: &str) -> Option<usize> {
    if a == b {
        return None;
    }
    let mut a_lines = a.split('\n');
    let mut b_lines = b.split('\n');
    let mut line = 1;
    loop {
        match (a_lines.next(), b_lines.next()) {
            (Some(x), Some(y)) if x == y => line += 1,
            _ => return Some(line),
        }
    }
}
