//! Subject model.
//!
//! A subject is a reservable entity with a weekly duration budget. Each
//! placed lesson reduces the remaining budget; the subject is satisfied
//! once the budget reaches zero or below.

use super::{ComposedSlot, Reservable, Reservation, RoomKind, WeekGrid};
use crate::error::ReservationError;

/// A subject with a required weekly teaching time.
#[derive(Debug, Clone)]
pub struct Subject {
    /// Unique subject identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Room kind this subject must be taught in, if any.
    pub room_kind: Option<RoomKind>,
    remaining_minutes: i64,
    period_minutes: u32,
    reservation: Reservation,
}

impl Subject {
    /// Creates a subject requiring `weekly_minutes` of teaching.
    pub fn new(id: impl Into<String>, weekly_minutes: i64, grid: &WeekGrid) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            room_kind: None,
            remaining_minutes: weekly_minutes,
            period_minutes: grid.period_minutes,
            reservation: Reservation::whole_week(grid),
        }
    }

    /// Creates a subject requiring `periods` periods per week.
    pub fn with_periods(id: impl Into<String>, periods: usize, grid: &WeekGrid) -> Self {
        Self::new(id, grid.minutes_for(periods), grid)
    }

    /// Sets the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Requires a room of the given kind.
    pub fn with_room_kind(mut self, kind: impl Into<RoomKind>) -> Self {
        self.room_kind = Some(kind.into());
        self
    }

    /// Minutes still to be placed (may be negative after an overshoot).
    pub fn remaining_minutes(&self) -> i64 {
        self.remaining_minutes
    }

    /// Whether the weekly budget is used up.
    pub fn is_satisfied(&self) -> bool {
        self.remaining_minutes <= 0
    }

    /// Length of one period in minutes.
    pub fn period_minutes(&self) -> u32 {
        self.period_minutes
    }

    /// Minutes a run of this length takes.
    pub fn minutes_for(&self, slot: &ComposedSlot) -> i64 {
        slot.len() as i64 * self.period_minutes as i64
    }

    /// Reserves the run and charges it against the weekly budget.
    ///
    /// On error neither the reservation nor the budget changes.
    pub fn assign_for(&mut self, slot: &ComposedSlot) -> Result<(), ReservationError> {
        self.reservation.assign(&slot.slots())?;
        self.remaining_minutes -= self.minutes_for(slot);
        Ok(())
    }
}

impl Reservable for Subject {
    fn id(&self) -> &str {
        &self.id
    }

    fn reservation(&self) -> &Reservation {
        &self.reservation
    }
}
