//! Lesson record (solution entry).
//!
//! A lesson is one committed placement: a composed slot together with the
//! subject, teacher and room reserved for it. Lessons are only created by
//! the solver after all three reservations accepted the slot, and are never
//! modified afterwards.

use serde::{Deserialize, Serialize};

use super::{ComposedSlot, TimeSlot};

/// One placed lesson.
///
/// On deserialization the atomic slots are rebuilt from the composed slot;
/// a serialized `slots` list is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "LessonRecord")]
pub struct Lesson {
    slot: ComposedSlot,
    slots: Vec<TimeSlot>,
    subject_id: String,
    teacher_id: String,
    room_id: String,
    group: Option<String>,
}

#[derive(Deserialize)]
struct LessonRecord {
    slot: ComposedSlot,
    subject_id: String,
    teacher_id: String,
    room_id: String,
    group: Option<String>,
}

impl From<LessonRecord> for Lesson {
    fn from(record: LessonRecord) -> Self {
        let lesson = Lesson::new(
            record.slot,
            record.subject_id,
            record.teacher_id,
            record.room_id,
        );
        match record.group {
            Some(group) => lesson.with_group(group),
            None => lesson,
        }
    }
}

impl Lesson {
    /// Creates a lesson record.
    pub fn new(
        slot: ComposedSlot,
        subject_id: impl Into<String>,
        teacher_id: impl Into<String>,
        room_id: impl Into<String>,
    ) -> Self {
        Self {
            slots: slot.slots(),
            slot,
            subject_id: subject_id.into(),
            teacher_id: teacher_id.into(),
            room_id: room_id.into(),
            group: None,
        }
    }

    /// Sets the learner group label (e.g. year and section).
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// The composed slot.
    pub fn slot(&self) -> &ComposedSlot {
        &self.slot
    }

    /// Constituent atomic slots.
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    /// Number of periods.
    #[inline]
    pub fn periods(&self) -> usize {
        self.slots.len()
    }

    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    pub fn teacher_id(&self) -> &str {
        &self.teacher_id
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }
}
