///////////////////////////////////////////////////////////////////////////////
// Setup
///////////////////////////////////////////////////////////////////////////////

/// Controls how the configuration phase reacts to a failing step.
///
/// The dedicated pool steps are mostly idempotent but not transactional, so
/// in either mode a failed run can leave the environment partially
/// configured. `Strict` stops at the first failure and leaves the completion
/// sentinel unwritten; `BestEffort` runs every remaining step and reports
/// the failures at the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    Strict,
    BestEffort,
}

impl Default for FailureMode {
    fn default() -> Self {
        FailureMode::Strict
    }
}

/// Outcome of the configuration phase
#[derive(Debug, Default)]
pub struct SetupSummary {
    pub steps_run: usize,
    /// Names of steps that failed (can only be non-empty in best-effort mode)
    pub failed_steps: Vec<String>,
}

impl SetupSummary {
    pub fn is_clean(&self) -> bool {
        self.failed_steps.is_empty()
    }
}
