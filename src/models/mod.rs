//! Timetabling domain models.
//!
//! Provides the core data types for weekly lesson timetabling: the grid
//! and its slots, the reservation model shared by every schedulable
//! entity, and the lesson records a solution is made of.
//!
//! # Domain Mappings
//!
//! | u-timetable | School | University | Training center |
//! |-------------|--------|------------|-----------------|
//! | Subject | Subject | Course | Module |
//! | Teacher | Teacher | Lecturer | Trainer |
//! | Room | Classroom | Lecture hall | Lab |
//! | Lesson | Timetable cell | Session | Class |

mod lesson;
mod reservation;
mod resource;
mod slot;
mod subject;
mod week;

pub use lesson::Lesson;
pub use reservation::{common_assigned_slots, Reservable, Reservation};
pub use resource::{Room, RoomKind, Teacher};
pub use slot::{ComposedSlot, TimeSlot};
pub use subject::Subject;
pub use week::{WeekGrid, Weekday};
