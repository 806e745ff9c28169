//! Outcome of a single optimization run.

use serde::{Deserialize, Serialize};

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationReason {
    /// Every configured decade ran.
    MaxDecades,
    /// A single empire remained and early stopping was requested.
    SingleEmpire,
}

/// Result of one ICA run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IcaResult {
    /// Best position found
    pub solution: Vec<f64>,
    /// Cost at [`solution`](Self::solution)
    pub objective_value: f64,
    /// Decades executed, including one that ended the run early
    pub decades: usize,
    /// Best cost after each completed decade
    pub history: Vec<f64>,
    /// Why the run stopped
    pub termination: TerminationReason,
    /// Empires alive when the run stopped
    pub empires_remaining: usize,
    /// Decades whose sink record failed
    pub sink_failures: usize,
}

impl IcaResult {
    /// Whether the run stopped because a single empire remained.
    #[must_use]
    pub fn stopped_early(&self) -> bool {
        self.termination == TerminationReason::SingleEmpire
    }
}
