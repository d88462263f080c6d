//! Append-only record of committed turns within one round.
//!
//! The log grows by exactly one step per resolved click and is cleared only on
//! new-game or reconfiguration. Together with the pre-round anchor snapshot it
//! is what makes rollback possible: restore the anchor, replay a prefix.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// One committed turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Board size when the step was taken.
    pub total: usize,
    /// Detonated cell indices, in detonation order.
    pub detonated: Vec<usize>,
    /// The secret target, present only if this step ended the round.
    pub revealed_target: Option<usize>,
    /// Who clicked.
    pub player_id: PlayerId,
}

/// Append-only step log.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepLog {
    steps: Vec<Step>,
}

impl StepLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a committed step.
    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// All steps in commit order.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of committed steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether no step has been committed since the last reset.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Drop every step after the first `keep`.
    pub fn truncate(&mut self, keep: usize) {
        self.steps.truncate(keep);
    }

    /// Drop all steps.
    pub fn clear(&mut self) {
        self.steps.clear();
    }
}
