//! Per-scenario comparison policies.

use parity_compare::{Comparator, TextPolicy, Verdict};
use parity_exec::CapturedResult;

use crate::context::Paired;

/// How a pair of results is judged.
///
/// `Strict` compares text and exit codes. The remaining variants are weak:
/// they check one coarse property where legitimate nondeterminism makes a
/// text comparison unreliable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Equivalence {
    /// Equal exit codes and equal combined output under the text policy.
    Strict(TextPolicy),
    /// Equal exit codes only.
    ExitCode,
    /// Both exited with code 0.
    BothSucceed,
    /// Same number of non-empty stdout lines.
    LineCount,
    /// Both outputs contain the marker string.
    Contains(String),
}

impl Equivalence {
    /// Strict comparison after hash normalization.
    pub fn normalized() -> Self {
        Equivalence::Strict(TextPolicy::Normalized)
    }

    /// Strict byte-for-byte comparison.
    pub fn verbatim() -> Self {
        Equivalence::Strict(TextPolicy::Verbatim)
    }

    pub fn contains(marker: impl Into<String>) -> Self {
        Equivalence::Contains(marker.into())
    }

    pub fn evaluate(&self, cmp: &Comparator, results: &Paired<CapturedResult>) -> Verdict {
        let b = &results.baseline;
        let c = &results.candidate;
        match self {
            Equivalence::Strict(policy) => {
                if b.exit_code != c.exit_code {
                    return mismatch(cmp, exit_pair(b, c), b, c);
                }
                cmp.compare(&b.combined(), &c.combined(), *policy)
            }
            Equivalence::ExitCode => {
                if b.exit_code == c.exit_code {
                    Verdict::Match
                } else {
                    mismatch(cmp, exit_pair(b, c), b, c)
                }
            }
            Equivalence::BothSucceed => {
                if b.success() && c.success() {
                    Verdict::Match
                } else {
                    let reason = format!(
                        "expected both to succeed, got {}",
                        exit_pair(b, c)
                    );
                    mismatch(cmp, reason, b, c)
                }
            }
            Equivalence::LineCount => {
                let (nb, nc) = (b.line_count(), c.line_count());
                if nb == nc {
                    Verdict::Match
                } else {
                    mismatch(cmp, format!("line count {nb} vs {nc}"), b, c)
                }
            }
            Equivalence::Contains(marker) => {
                let (hb, hc) = (b.combined().contains(marker), c.combined().contains(marker));
                if hb && hc {
                    Verdict::Match
                } else {
                    let reason = format!(
                        "marker {marker:?} present: baseline={hb}, candidate={hc}"
                    );
                    mismatch(cmp, reason, b, c)
                }
            }
        }
    }
}

fn exit_pair(b: &CapturedResult, c: &CapturedResult) -> String {
    format!("exit code {} vs {}", b.exit_code, c.exit_code)
}

fn mismatch(cmp: &Comparator, reason: String, b: &CapturedResult, c: &CapturedResult) -> Verdict {
    Verdict::Mismatch(cmp.divergence(reason, &b.combined(), &c.combined()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(b: CapturedResult, c: CapturedResult) -> Paired<CapturedResult> {
        Paired::new(b, c)
    }

    #[test]
    fn strict_requires_equal_exit_codes() {
        let cmp = Comparator::default();
        let results = pair(
            CapturedResult::new("same\n", "", 0),
            CapturedResult::new("same\n", "", 1),
        );
        let verdict = Equivalence::normalized().evaluate(&cmp, &results);
        assert_eq!(verdict.divergence().unwrap().reason, "exit code 0 vs 1");
    }

    #[test]
    fn strict_normalized_ignores_hashes() {
        let cmp = Comparator::default();
        let results = pair(
            CapturedResult::new("[main 3b18e51] Add\n", "", 0),
            CapturedResult::new("[main 9fceb02] Add\n", "", 0),
        );
        assert!(Equivalence::normalized().evaluate(&cmp, &results).is_match());
        assert!(!Equivalence::verbatim().evaluate(&cmp, &results).is_match());
    }

    #[test]
    fn strict_compares_stderr_too() {
        let cmp = Comparator::default();
        let results = pair(
            CapturedResult::new("", "warning: a\n", 0),
            CapturedResult::new("", "warning: b\n", 0),
        );
        assert!(!Equivalence::normalized().evaluate(&cmp, &results).is_match());
    }

    #[test]
    fn exit_code_ignores_text() {
        let cmp = Comparator::default();
        let results = pair(
            CapturedResult::new("Checking objects: 100%\n", "", 0),
            CapturedResult::new("", "", 0),
        );
        assert!(Equivalence::ExitCode.evaluate(&cmp, &results).is_match());
    }

    #[test]
    fn both_succeed_rejects_shared_failure() {
        let cmp = Comparator::default();
        let results = pair(
            CapturedResult::new("", "CONFLICT\n", 1),
            CapturedResult::new("", "CONFLICT\n", 1),
        );
        assert!(Equivalence::ExitCode.evaluate(&cmp, &results).is_match());
        assert!(!Equivalence::BothSucceed.evaluate(&cmp, &results).is_match());
    }

    #[test]
    fn line_count_compares_counts_only() {
        let cmp = Comparator::default();
        let results = pair(
            CapturedResult::new("?? a\n?? b\n", "", 0),
            CapturedResult::new("?? b\n?? a\n", "", 0),
        );
        assert!(Equivalence::LineCount.evaluate(&cmp, &results).is_match());

        let short = pair(
            CapturedResult::new("?? a\n?? b\n", "", 0),
            CapturedResult::new("?? a\n", "", 0),
        );
        let verdict = Equivalence::LineCount.evaluate(&cmp, &short);
        assert_eq!(verdict.divergence().unwrap().reason, "line count 2 vs 1");
    }

    #[test]
    fn contains_requires_marker_on_both_sides() {
        let cmp = Comparator::default();
        let marker = Equivalence::contains("parity-stash");
        let both = pair(
            CapturedResult::new("stash@{0}: On main: parity-stash\n", "", 0),
            CapturedResult::new("stash@{0}: On main: parity-stash\n", "", 0),
        );
        assert!(marker.evaluate(&cmp, &both).is_match());

        let one = pair(
            CapturedResult::new("stash@{0}: On main: parity-stash\n", "", 0),
            CapturedResult::new("", "", 0),
        );
        assert!(!marker.evaluate(&cmp, &one).is_match());
    }
}
