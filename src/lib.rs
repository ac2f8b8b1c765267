//! Weekly lesson timetabling for the U-Engine ecosystem.
//!
//! Places lessons (subject + teacher + room) into the fixed periods of a
//! school week so that no teacher, room or subject is booked twice at the
//! same time and every subject receives its required weekly time.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `TimeSlot`, `ComposedSlot`, `WeekGrid`,
//!   `Reservation`, `Subject`, `Teacher`, `Room`, `Lesson`
//! - **`pool`**: The global pool of unplaced slot runs
//! - **`selection`**: Candidate selection catalogs (subject → teacher → room)
//! - **`solver`**: Round-based greedy solver with serial and random
//!   strategy selection
//! - **`validation`**: Input checks and double-booking detection
//!
//! # Architecture
//!
//! The solver only depends on the `SlotPool` and catalog traits; the
//! bundled rosters are simple deterministic policies and can be replaced
//! by domain-specific ones (curriculum rules, weekly-load limits).
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Burke & Petrovic (2002), "Recent Research Directions in Automated Timetabling"

pub mod error;
pub mod models;
pub mod pool;
pub mod selection;
pub mod solver;
pub mod validation;
