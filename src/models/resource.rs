//! Teacher and room models.
//!
//! Both are plain reservable entities. A teacher carries the set of
//! subjects it is qualified for; a room may carry a kind (e.g. "lab")
//! that subjects can require.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{Reservable, Reservation, TimeSlot, WeekGrid};
use crate::error::ReservationError;

/// A teacher.
#[derive(Debug, Clone)]
pub struct Teacher {
    /// Unique teacher identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Subject ids this teacher can teach.
    pub subjects: BTreeSet<String>,
    reservation: Reservation,
}

impl Teacher {
    /// Creates a teacher free for the whole week.
    pub fn new(id: impl Into<String>, grid: &WeekGrid) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            subjects: BTreeSet::new(),
            reservation: Reservation::whole_week(grid),
        }
    }

    /// Sets the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a subject the teacher is qualified for.
    pub fn with_subject(mut self, subject_id: impl Into<String>) -> Self {
        self.subjects.insert(subject_id.into());
        self
    }

    /// Marks slots the teacher is not available for.
    pub fn with_unavailable(mut self, slots: impl IntoIterator<Item = TimeSlot>) -> Self {
        self.reservation.block(slots);
        self
    }

    /// Whether the teacher is qualified for a subject.
    pub fn can_teach(&self, subject_id: &str) -> bool {
        self.subjects.contains(subject_id)
    }

    /// Assigns atomic slots, all or nothing.
    pub fn assign_for(&mut self, slots: &[TimeSlot]) -> Result<(), ReservationError> {
        self.reservation.assign(slots)
    }
}

impl Reservable for Teacher {
    fn id(&self) -> &str {
        &self.id
    }

    fn reservation(&self) -> &Reservation {
        &self.reservation
    }
}

/// A room.
#[derive(Debug, Clone)]
pub struct Room {
    /// Unique room identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Room classification, if any.
    pub kind: Option<RoomKind>,
    reservation: Reservation,
}

/// Room classification matched against a subject's requirement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomKind(pub String);

impl From<&str> for RoomKind {
    fn from(kind: &str) -> Self {
        Self(kind.to_string())
    }
}

impl Room {
    /// Creates a room free for the whole week.
    pub fn new(id: impl Into<String>, grid: &WeekGrid) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            kind: None,
            reservation: Reservation::whole_week(grid),
        }
    }

    /// Sets the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the room kind.
    pub fn with_kind(mut self, kind: impl Into<RoomKind>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Marks slots the room cannot be used in.
    pub fn with_unavailable(mut self, slots: impl IntoIterator<Item = TimeSlot>) -> Self {
        self.reservation.block(slots);
        self
    }

    /// Whether the room satisfies an optional kind requirement.
    pub fn is_kind(&self, required: Option<&RoomKind>) -> bool {
        match required {
            None => true,
            Some(kind) => self.kind.as_ref() == Some(kind),
        }
    }

    /// Assigns atomic slots, all or nothing.
    pub fn assign_for(&mut self, slots: &[TimeSlot]) -> Result<(), ReservationError> {
        self.reservation.assign(slots)
    }
}

impl Reservable for Room {
    fn id(&self) -> &str {
        &self.id
    }

    fn reservation(&self) -> &Reservation {
        &self.reservation
    }
}
