//! Round strategies and per-round strategy selection.
//!
//! A strategy splits one contiguous run into lessons: `{2,1,1}` places a
//! double period followed by two single periods. Strategies come from a
//! small closed catalog; a selector picks one per round.

use std::fmt;

use rand::Rng;

use crate::models::TimeSlot;

/// Ordered period-group sizes for one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Strategy(&'static [usize]);

impl Strategy {
    /// The strategy catalog, in serial selection order.
    pub const CATALOG: [Strategy; 8] = [
        Strategy(&[1, 3]),
        Strategy(&[2, 2]),
        Strategy(&[1, 2, 1]),
        Strategy(&[1, 1, 2]),
        Strategy(&[2, 1, 1]),
        Strategy(&[3]),
        Strategy(&[2]),
        Strategy(&[1]),
    ];

    /// Group sizes, in order.
    pub fn periods(&self) -> &'static [usize] {
        self.0
    }

    /// Number of lessons the strategy places.
    pub fn group_count(&self) -> usize {
        self.0.len()
    }

    /// Length of the run the strategy needs.
    pub fn total_periods(&self) -> usize {
        self.0.iter().sum()
    }

    /// Splits a run into consecutive groups of the strategy's sizes.
    ///
    /// Returns `None` if the run length differs from
    /// [`total_periods`](Self::total_periods).
    pub fn partition<'a>(&self, run: &'a [TimeSlot]) -> Option<Vec<&'a [TimeSlot]>> {
        if run.len() != self.total_periods() {
            return None;
        }
        let mut rest = run;
        let mut groups = Vec::with_capacity(self.0.len());
        for &size in self.0 {
            let (head, tail) = rest.split_at(size);
            groups.push(head);
            rest = tail;
        }
        Some(groups)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|p| p.to_string()).collect();
        write!(f, "{{{}}}", parts.join(","))
    }
}

/// Deterministic selection: cycles through the catalog by round index.
pub fn serial_strategy(round: usize) -> Strategy {
    Strategy::CATALOG[round % Strategy::CATALOG.len()]
}

/// Uniform random selection from the catalog, with replacement.
#[derive(Debug, Clone)]
pub struct RandomSelector<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomSelector<R> {
    /// Creates a selector drawing from `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draws a strategy. The round index is not used.
    pub fn select(&mut self, _round: usize) -> Strategy {
        Strategy::CATALOG[self.rng.random_range(0..Strategy::CATALOG.len())]
    }
}
