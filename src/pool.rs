//! Global pool of unplaced time slots.
//!
//! The solver draws contiguous runs of atomic slots from the pool, one
//! run per round. A failed round hands its run back unchanged.

use std::collections::BTreeSet;

use crate::models::{TimeSlot, WeekGrid};

/// Source of contiguous slot runs for the solver.
pub trait SlotPool {
    /// Permanently removes slots from the pool.
    fn discard_slots(&mut self, slots: &BTreeSet<TimeSlot>);

    /// Removes and returns `n` consecutive periods of one day, in order.
    ///
    /// Returns `None` (and leaves the pool untouched) if no such run exists
    /// or `n` is zero.
    fn pop_consecutive_slots(&mut self, n: usize) -> Option<Vec<TimeSlot>>;

    /// Reinserts a run previously returned by
    /// [`pop_consecutive_slots`](SlotPool::pop_consecutive_slots).
    fn put_back_slots(&mut self, slots: Vec<TimeSlot>);
}

/// Slot pool over the weekly grid.
///
/// Runs are handed out earliest first: the first day, then the first
/// period, that starts `n` free consecutive periods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklySlotPool {
    available: BTreeSet<TimeSlot>,
}

impl WeeklySlotPool {
    /// A pool holding every slot of the grid.
    pub fn new(grid: &WeekGrid) -> Self {
        Self {
            available: grid.slots(),
        }
    }

    /// A pool holding exactly the given slots.
    pub fn from_slots(slots: impl IntoIterator<Item = TimeSlot>) -> Self {
        Self {
            available: slots.into_iter().collect(),
        }
    }

    /// Slots currently available.
    pub fn available(&self) -> &BTreeSet<TimeSlot> {
        &self.available
    }

    /// Number of available slots.
    pub fn len(&self) -> usize {
        self.available.len()
    }

    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }

    fn find_run(&self, n: usize) -> Option<Vec<TimeSlot>> {
        let mut run: Vec<TimeSlot> = Vec::with_capacity(n);
        for slot in &self.available {
            match run.last() {
                Some(last) if last.is_followed_by(slot) => run.push(*slot),
                _ => {
                    run.clear();
                    run.push(*slot);
                }
            }
            if run.len() == n {
                return Some(run);
            }
        }
        None
    }
}

impl SlotPool for WeeklySlotPool {
    fn discard_slots(&mut self, slots: &BTreeSet<TimeSlot>) {
        self.available.retain(|s| !slots.contains(s));
    }

    fn pop_consecutive_slots(&mut self, n: usize) -> Option<Vec<TimeSlot>> {
        if n == 0 {
            return None;
        }
        let run = self.find_run(n)?;
        for slot in &run {
            self.available.remove(slot);
        }
        Some(run)
    }

    fn put_back_slots(&mut self, slots: Vec<TimeSlot>) {
        self.available.extend(slots);
    }
}
