//! Reservation model.
//!
//! Every schedulable entity (subject, teacher, room) owns a [`Reservation`]:
//! the atomic slots it still has free and the ones already assigned.
//! The two sets are always disjoint; batch assignment is the only way
//! slots move between them and it is all-or-nothing.

use std::collections::BTreeSet;

use super::{ComposedSlot, TimeSlot, WeekGrid};
use crate::error::ReservationError;

/// Free and assigned atomic slots of one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    free: BTreeSet<TimeSlot>,
    assigned: BTreeSet<TimeSlot>,
}

impl Reservation {
    /// A reservation with the whole week free.
    pub fn whole_week(grid: &WeekGrid) -> Self {
        Self {
            free: grid.slots(),
            assigned: BTreeSet::new(),
        }
    }

    /// Slots still free.
    pub fn free_slots(&self) -> &BTreeSet<TimeSlot> {
        &self.free
    }

    /// Slots already assigned, in order.
    pub fn assigned_slots(&self) -> &BTreeSet<TimeSlot> {
        &self.assigned
    }

    /// Number of assigned slots.
    pub fn assigned_count(&self) -> usize {
        self.assigned.len()
    }

    /// Whether every slot of the run is still free.
    pub fn is_free_during(&self, slot: &ComposedSlot) -> bool {
        slot.slots().iter().all(|s| self.free.contains(s))
    }

    /// Moves all `slots` from free to assigned, or none of them.
    ///
    /// # Errors
    /// [`ReservationError::NotFree`] naming the first slot that is not free;
    /// the reservation is left untouched.
    pub fn assign(&mut self, slots: &[TimeSlot]) -> Result<(), ReservationError> {
        if let Some(taken) = slots.iter().find(|s| !self.free.contains(s)) {
            return Err(ReservationError::NotFree(*taken));
        }
        for slot in slots {
            self.free.remove(slot);
            self.assigned.insert(*slot);
        }
        Ok(())
    }

    /// Marks slots as unavailable before solving.
    ///
    /// Slots that are not free are skipped.
    pub fn block(&mut self, slots: impl IntoIterator<Item = TimeSlot>) {
        for slot in slots {
            if self.free.remove(&slot) {
                self.assigned.insert(slot);
            }
        }
    }
}

/// An entity that owns a [`Reservation`].
pub trait Reservable {
    /// Unique identifier.
    fn id(&self) -> &str;

    /// Read access to the reservation.
    fn reservation(&self) -> &Reservation;

    /// Whether the entity is free for the whole run.
    fn is_free_during(&self, slot: &ComposedSlot) -> bool {
        self.reservation().is_free_during(slot)
    }

    /// Number of assigned atomic slots.
    fn assigned_count(&self) -> usize {
        self.reservation().assigned_count()
    }
}

/// Slots assigned in *every* given entity.
///
/// Returns the empty set when there are no entities.
pub fn common_assigned_slots<'a, R, I>(entities: I) -> BTreeSet<TimeSlot>
where
    R: Reservable + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut iter = entities.into_iter();
    let Some(first) = iter.next() else {
        return BTreeSet::new();
    };
    let mut common = first.reservation().assigned_slots().clone();
    for entity in iter {
        let assigned = entity.reservation().assigned_slots();
        common.retain(|s| assigned.contains(s));
        if common.is_empty() {
            break;
        }
    }
    common
}
