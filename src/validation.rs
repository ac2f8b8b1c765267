//! Input and timetable validation.
//!
//! Input checks run before solving and detect:
//! - Duplicate subject, teacher or room IDs
//! - Subjects no teacher is qualified for
//! - Subjects requiring a room kind no room has
//!
//! Timetable checks run on placed lessons and detect double-booking of a
//! teacher, room or subject, and lessons whose slots are not the expansion
//! of their composed slot.

use std::collections::{HashMap, HashSet};

use crate::models::{Lesson, Room, Subject, Teacher, TimeSlot};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// No teacher can teach a subject.
    NoQualifiedTeacher,
    /// No room has the kind a subject requires.
    NoMatchingRoom,
    /// A teacher, room or subject holds two lessons at the same time.
    DoubleBooked,
    /// A lesson's atomic slots do not match its composed slot.
    SlotMismatch,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input of a timetabling problem.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    subjects: &[Subject],
    teachers: &[Teacher],
    rooms: &[Room],
) -> ValidationResult {
    let mut errors = Vec::new();

    check_unique("subject", subjects.iter().map(|s| s.id.as_str()), &mut errors);
    check_unique("teacher", teachers.iter().map(|t| t.id.as_str()), &mut errors);
    check_unique("room", rooms.iter().map(|r| r.id.as_str()), &mut errors);

    for subject in subjects {
        if !teachers.iter().any(|t| t.can_teach(&subject.id)) {
            errors.push(ValidationError::new(
                ValidationErrorKind::NoQualifiedTeacher,
                format!("No teacher can teach subject '{}'", subject.id),
            ));
        }
        if let Some(kind) = &subject.room_kind {
            if !rooms.iter().any(|r| r.is_kind(Some(kind))) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NoMatchingRoom,
                    format!(
                        "Subject '{}' requires a '{}' room but none exists",
                        subject.id, kind.0
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a set of placed lessons.
///
/// Checks that no teacher, room or subject appears in two lessons sharing
/// an atomic slot, and that every lesson's slots expand its composed slot.
pub fn validate_lessons(lessons: &[Lesson]) -> ValidationResult {
    let mut errors = Vec::new();

    for lesson in lessons {
        if lesson.slots() != lesson.slot().slots().as_slice() {
            errors.push(ValidationError::new(
                ValidationErrorKind::SlotMismatch,
                format!(
                    "Lesson of '{}' at {} lists slots that differ from its run",
                    lesson.subject_id(),
                    lesson.slot()
                ),
            ));
        }
    }

    check_double_booking("teacher", lessons, Lesson::teacher_id, &mut errors);
    check_double_booking("room", lessons, Lesson::room_id, &mut errors);
    check_double_booking("subject", lessons, Lesson::subject_id, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_unique<'a>(
    what: &str,
    ids: impl Iterator<Item = &'a str>,
    errors: &mut Vec<ValidationError>,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {what} ID: {id}"),
            ));
        }
    }
}

fn check_double_booking(
    what: &str,
    lessons: &[Lesson],
    key: fn(&Lesson) -> &str,
    errors: &mut Vec<ValidationError>,
) {
    let mut occupied: HashMap<(&str, TimeSlot), usize> = HashMap::new();
    for (idx, lesson) in lessons.iter().enumerate() {
        for slot in lesson.slots() {
            if let Some(prev) = occupied.insert((key(lesson), *slot), idx) {
                if prev != idx {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::DoubleBooked,
                        format!("{what} '{}' is booked twice at {slot}", key(lesson)),
                    ));
                }
            }
        }
    }
}
