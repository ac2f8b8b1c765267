//! Round-based greedy timetable solver.
//!
//! # Algorithm
//!
//! `SimpleSolver` runs a bounded number of rounds. Each round takes one
//! contiguous run of periods from the slot pool, splits it according to a
//! [`Strategy`], fills every group with a subject, teacher and room, and
//! either commits all groups or puts the run back untouched. The loop stops
//! as soon as every subject's weekly budget is used up, or reports
//! [`Solution::NotSolved`] when the round budget runs out.
//!
//! It is a greedy search without backtracking across rounds; it is not
//! guaranteed to find a timetable even when one exists.
//!
//! # Strategy selection
//!
//! - Serial: cycles through [`Strategy::CATALOG`] by round index.
//! - Random: draws uniformly from the catalog each round.

mod config;
mod round;
mod simple;
mod strategy;

pub use config::{SelectionMode, SolverConfig};
pub use round::{RoundFailure, RoundOutcome};
pub use simple::{SimpleSolver, Solution};
pub use strategy::{serial_strategy, RandomSelector, Strategy};
