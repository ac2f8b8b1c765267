//! Solver configuration.

use serde::{Deserialize, Serialize};

/// How a strategy is chosen for each round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionMode {
    /// Cycle through the catalog in order.
    #[default]
    Serial,
    /// Draw uniformly from the catalog.
    Random,
}

/// Parameters for [`SimpleSolver::solve`](super::SimpleSolver::solve).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Maximum number of rounds.
    pub round_budget: usize,
    /// Strategy selection mode.
    pub mode: SelectionMode,
    /// Seed for [`SelectionMode::Random`]; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Learner group label stamped on every lesson.
    pub group: Option<String>,
}

impl SolverConfig {
    /// Serial mode with the given round budget.
    pub fn new(round_budget: usize) -> Self {
        Self {
            round_budget,
            mode: SelectionMode::Serial,
            seed: None,
            group: None,
        }
    }

    /// Sets the selection mode.
    pub fn with_mode(mut self, mode: SelectionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Switches to random mode with a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.mode = SelectionMode::Random;
        self.seed = Some(seed);
        self
    }

    /// Sets the learner group label.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new(1000)
    }
}
