use parity_exec::{Label, ToolInstance};

use crate::Result;

/// The two instances under comparison.
#[derive(Debug, Clone)]
pub struct InstancePair {
    baseline: ToolInstance,
    candidate: ToolInstance,
}

impl InstancePair {
    pub fn new(baseline: ToolInstance, candidate: ToolInstance) -> Self {
        debug_assert_eq!(baseline.label(), Label::Baseline);
        debug_assert_eq!(candidate.label(), Label::Candidate);
        Self { baseline, candidate }
    }

    pub fn baseline(&self) -> &ToolInstance {
        &self.baseline
    }

    pub fn candidate(&self) -> &ToolInstance {
        &self.candidate
    }

    pub fn get(&self, label: Label) -> &ToolInstance {
        match label {
            Label::Baseline => &self.baseline,
            Label::Candidate => &self.candidate,
        }
    }

    /// Both instances, baseline first.
    pub fn both(&self) -> [&ToolInstance; 2] {
        [&self.baseline, &self.candidate]
    }

    /// Destroy and recreate both working trees.
    pub fn prepare(&self) -> Result<()> {
        for inst in self.both() {
            inst.check_executable()?;
            inst.prepare()?;
        }
        Ok(())
    }
}
