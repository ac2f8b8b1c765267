//! Default in-memory catalogs.
//!
//! Simple deterministic policies:
//! - subjects: unsatisfied, free, within budget and daily limit; the pick
//!   rotates with the slot position so neighbouring groups of one round
//!   tend to get different subjects.
//! - teachers: qualified and free, fewest assigned periods first.
//! - rooms: matching kind and free, fewest assigned periods first.
//!
//! Ties always go to insertion order.

use std::collections::BTreeSet;

use super::{RoomCatalog, SubjectCatalog, TeacherCatalog};
use crate::models::{
    common_assigned_slots, ComposedSlot, Reservable, Room, Subject, Teacher, TimeSlot,
};

/// Subjects in insertion order.
#[derive(Debug, Clone, Default)]
pub struct SubjectRoster {
    subjects: Vec<Subject>,
    max_periods_per_day: Option<usize>,
}

impl SubjectRoster {
    /// Creates a roster.
    pub fn new(subjects: Vec<Subject>) -> Self {
        Self {
            subjects,
            max_periods_per_day: None,
        }
    }

    /// Caps how many periods of one subject may fall on the same day.
    pub fn with_daily_limit(mut self, max_periods: usize) -> Self {
        self.max_periods_per_day = Some(max_periods);
        self
    }

    /// All subjects.
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    /// Lookup by id.
    pub fn get(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    fn within_daily_limit(&self, subject: &Subject, slot: &ComposedSlot) -> bool {
        let Some(limit) = self.max_periods_per_day else {
            return true;
        };
        let taught = subject
            .reservation()
            .assigned_slots()
            .iter()
            .filter(|s| s.day == slot.day())
            .count();
        taught + slot.len() <= limit
    }

    /// Whether the run fits the remaining budget without overshooting by
    /// a whole period or more.
    fn fits_budget(subject: &Subject, slot: &ComposedSlot) -> bool {
        subject.minutes_for(slot) - subject.remaining_minutes() < subject.period_minutes() as i64
    }
}

impl SubjectCatalog for SubjectRoster {
    fn total_remaining_minutes(&self) -> i64 {
        self.subjects
            .iter()
            .map(|s| s.remaining_minutes().max(0))
            .sum()
    }

    fn subject_suitable_for(&self, slot: &ComposedSlot) -> Option<&Subject> {
        let candidates: Vec<&Subject> = self
            .subjects
            .iter()
            .filter(|s| !s.is_satisfied())
            .filter(|s| s.is_free_during(slot))
            .filter(|s| Self::fits_budget(s, slot))
            .filter(|s| self.within_daily_limit(s, slot))
            .collect();
        if candidates.is_empty() {
            return None;
        }
        let offset = slot.day() as usize + slot.first_period() as usize;
        Some(candidates[offset % candidates.len()])
    }

    fn subject_mut(&mut self, id: &str) -> Option<&mut Subject> {
        self.subjects.iter_mut().find(|s| s.id == id)
    }
}

/// Teachers in insertion order.
#[derive(Debug, Clone, Default)]
pub struct TeacherRoster {
    teachers: Vec<Teacher>,
}

impl TeacherRoster {
    /// Creates a roster.
    pub fn new(teachers: Vec<Teacher>) -> Self {
        Self { teachers }
    }

    /// All teachers.
    pub fn teachers(&self) -> &[Teacher] {
        &self.teachers
    }

    /// Lookup by id.
    pub fn get(&self, id: &str) -> Option<&Teacher> {
        self.teachers.iter().find(|t| t.id == id)
    }
}

impl TeacherCatalog for TeacherRoster {
    fn common_slots(&self) -> BTreeSet<TimeSlot> {
        common_assigned_slots(&self.teachers)
    }

    fn suitable_teacher_for(&self, subject: &Subject, slot: &ComposedSlot) -> Option<&Teacher> {
        self.teachers
            .iter()
            .filter(|t| t.can_teach(&subject.id) && t.is_free_during(slot))
            .min_by_key(|t| t.assigned_count())
    }

    fn teacher_mut(&mut self, id: &str) -> Option<&mut Teacher> {
        self.teachers.iter_mut().find(|t| t.id == id)
    }
}

/// Rooms in insertion order.
#[derive(Debug, Clone, Default)]
pub struct RoomRoster {
    rooms: Vec<Room>,
}

impl RoomRoster {
    /// Creates a roster.
    pub fn new(rooms: Vec<Room>) -> Self {
        Self { rooms }
    }

    /// All rooms.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Lookup by id.
    pub fn get(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }
}

impl RoomCatalog for RoomRoster {
    fn common_slots(&self) -> BTreeSet<TimeSlot> {
        common_assigned_slots(&self.rooms)
    }

    fn free_room_during(&self, subject: &Subject, slot: &ComposedSlot) -> Option<&Room> {
        self.rooms
            .iter()
            .filter(|r| r.is_kind(subject.room_kind.as_ref()) && r.is_free_during(slot))
            .min_by_key(|r| r.assigned_count())
    }

    fn room_mut(&mut self, id: &str) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|r| r.id == id)
    }
}
