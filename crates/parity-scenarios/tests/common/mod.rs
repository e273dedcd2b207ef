//! Shared setup for scenario integration tests.
//!
//! The system `git` plays both baseline and candidate. With the same build
//! on both sides, every scenario must pass; tests that expect failures
//! break lock-step on purpose.

#![allow(dead_code)]

use std::path::Path;

use parity_exec::{Label, ToolInstance};
use parity_scenarios::{Harness, HarnessConfig, InstancePair};

/// A pair where both instances run the system `git`.
pub fn git_pair(work: &Path) -> InstancePair {
    InstancePair::new(
        ToolInstance::new(Label::Baseline, "git", work),
        ToolInstance::new(Label::Candidate, "git", work),
    )
}

/// A harness over [`git_pair`] with a small rapid-mutation workload.
pub fn git_harness(work: &Path) -> Harness {
    let config = HarnessConfig {
        rapid_files: 12,
        rapid_probe_interval: 4,
        ..HarnessConfig::default()
    };
    Harness::new(git_pair(work), config)
}
