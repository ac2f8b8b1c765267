//! Candidate selection for composed slots.
//!
//! The solver fills each composed slot by asking three catalogs in a fixed
//! order: a subject first, then a teacher and a room *for that subject*.
//! Suitability policies live entirely behind these traits; the solver only
//! relies on the contract that a proposed entity is free for the slot.
//!
//! # Usage
//!
//! ```
//! use u_timetable::models::{ComposedSlot, Subject, Teacher, Room, TimeSlot, WeekGrid, Weekday};
//! use u_timetable::selection::{RoomCatalog, RoomRoster, SubjectCatalog, SubjectRoster,
//!     TeacherCatalog, TeacherRoster};
//!
//! let grid = WeekGrid::default();
//! let subjects = SubjectRoster::new(vec![Subject::with_periods("math", 4, &grid)]);
//! let teachers = TeacherRoster::new(vec![Teacher::new("T1", &grid).with_subject("math")]);
//! let rooms = RoomRoster::new(vec![Room::new("R1", &grid)]);
//!
//! let slot = ComposedSlot::from(TimeSlot::new(Weekday::Monday, 0));
//! let subject = subjects.subject_suitable_for(&slot).unwrap();
//! assert_eq!(teachers.suitable_teacher_for(subject, &slot).unwrap().id, "T1");
//! assert_eq!(rooms.free_room_during(subject, &slot).unwrap().id, "R1");
//! ```

mod roster;

pub use roster::{RoomRoster, SubjectRoster, TeacherRoster};

use std::collections::BTreeSet;

use crate::models::{ComposedSlot, Room, Subject, Teacher, TimeSlot};

/// Subjects to be placed and the policy choosing among them.
pub trait SubjectCatalog {
    /// Sum of remaining minutes over all subjects.
    ///
    /// The solver stops once this is zero or below.
    fn total_remaining_minutes(&self) -> i64;

    /// Proposes a subject for the slot, or `None` if no subject fits.
    ///
    /// The proposed subject must be free for every atomic slot of `slot`.
    fn subject_suitable_for(&self, slot: &ComposedSlot) -> Option<&Subject>;

    /// Mutable lookup by id, used to commit a placement.
    fn subject_mut(&mut self, id: &str) -> Option<&mut Subject>;
}

/// Teachers and the policy choosing one for a subject.
pub trait TeacherCatalog {
    /// Slots assigned in every teacher.
    fn common_slots(&self) -> BTreeSet<TimeSlot>;

    /// Proposes a teacher able to teach `subject` during `slot`.
    ///
    /// The proposed teacher must be free for every atomic slot of `slot`.
    fn suitable_teacher_for(&self, subject: &Subject, slot: &ComposedSlot) -> Option<&Teacher>;

    /// Mutable lookup by id, used to commit a placement.
    fn teacher_mut(&mut self, id: &str) -> Option<&mut Teacher>;
}

/// Rooms and the policy choosing one for a subject.
pub trait RoomCatalog {
    /// Slots assigned in every room.
    fn common_slots(&self) -> BTreeSet<TimeSlot>;

    /// Proposes a room usable for `subject` and free during `slot`.
    fn free_room_during(&self, subject: &Subject, slot: &ComposedSlot) -> Option<&Room>;

    /// Mutable lookup by id, used to commit a placement.
    fn room_mut(&mut self, id: &str) -> Option<&mut Room>;
}
