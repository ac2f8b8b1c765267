//! One solver round.
//!
//! # Algorithm
//!
//! 1. Pop a run of `strategy.total_periods()` consecutive slots from the pool.
//! 2. Split it into the strategy's groups and compose each group.
//! 3. For each group, pick subject, then teacher and room for that subject.
//! 4. Reject the round if a subject repeats.
//! 5. Commit every group into the reservations and emit lessons.
//!
//! Steps 1-4 only read reservation state, so any failure there is undone by
//! putting the popped run back. A rejection in step 5 means a catalog broke
//! its contract and is returned as a fatal [`SolveError`].

use std::collections::BTreeSet;

use log::trace;

use super::{SimpleSolver, Strategy};
use crate::error::{ReservationError, ResourceKind, Result, SlotError, SolveError};
use crate::models::{ComposedSlot, Lesson};
use crate::pool::SlotPool;
use crate::selection::{RoomCatalog, SubjectCatalog, TeacherCatalog};

/// Why a round placed nothing. All state was rolled back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundFailure {
    /// The pool holds no run of the required length.
    NoConsecutiveRun {
        /// Requested run length.
        periods: usize,
    },
    /// A group found no candidate at some selection step.
    NoCandidate {
        /// Index of the group within the strategy.
        group: usize,
        /// The group's slot.
        slot: ComposedSlot,
        /// The step that came up empty.
        missing: ResourceKind,
    },
    /// Two groups of the round chose the same subject.
    DuplicateSubject {
        /// The repeated subject.
        subject_id: String,
    },
}

/// Result of a round that did not hit a fatal error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Lessons committed by the round, in group order.
    Placed(Vec<Lesson>),
    /// Nothing committed.
    Failed(RoundFailure),
}

impl RoundOutcome {
    /// Whether the round committed lessons.
    pub fn is_placed(&self) -> bool {
        matches!(self, RoundOutcome::Placed(_))
    }
}

/// A fully selected, not yet committed group.
#[derive(Debug)]
struct Arrangement {
    slot: ComposedSlot,
    subject_id: String,
    teacher_id: String,
    room_id: String,
}

impl<P, S, T, R> SimpleSolver<P, S, T, R>
where
    P: SlotPool,
    S: SubjectCatalog,
    T: TeacherCatalog,
    R: RoomCatalog,
{
    /// Attempts one round with the given strategy.
    ///
    /// On `Ok(RoundOutcome::Failed(_))` the pool and every reservation are
    /// exactly as before the call.
    ///
    /// # Errors
    /// A fatal [`SolveError`] if the pool returned a broken run or a
    /// reservation rejected a slot selection reported as free.
    pub fn attempt_round(&mut self, strategy: Strategy) -> Result<RoundOutcome> {
        let total = strategy.total_periods();
        let Some(run) = self.pool.pop_consecutive_slots(total) else {
            return Ok(RoundOutcome::Failed(RoundFailure::NoConsecutiveRun {
                periods: total,
            }));
        };

        ComposedSlot::compose(&run)?;
        let groups = strategy
            .partition(&run)
            .ok_or(SlotError::LengthMismatch {
                expected: total,
                actual: run.len(),
            })?
            .into_iter()
            .map(ComposedSlot::compose)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut arrangements = Vec::with_capacity(groups.len());
        for (group, slot) in groups.into_iter().enumerate() {
            match self.arrange(&slot) {
                Ok(arrangement) => arrangements.push(arrangement),
                Err(missing) => {
                    self.pool.put_back_slots(run);
                    return Ok(RoundOutcome::Failed(RoundFailure::NoCandidate {
                        group,
                        slot,
                        missing,
                    }));
                }
            }
        }

        if let Some(subject_id) = repeated_subject(&arrangements) {
            self.pool.put_back_slots(run);
            return Ok(RoundOutcome::Failed(RoundFailure::DuplicateSubject {
                subject_id,
            }));
        }

        let lessons = arrangements
            .into_iter()
            .map(|a| self.commit(a))
            .collect::<Result<Vec<_>>>()?;
        Ok(RoundOutcome::Placed(lessons))
    }

    /// Picks subject, teacher and room for one slot, in that order.
    ///
    /// Returns the step that found no candidate on failure.
    fn arrange(&self, slot: &ComposedSlot) -> std::result::Result<Arrangement, ResourceKind> {
        let subject = self
            .subjects
            .subject_suitable_for(slot)
            .ok_or(ResourceKind::Subject)?;
        let teacher = self
            .teachers
            .suitable_teacher_for(subject, slot)
            .ok_or(ResourceKind::Teacher)?;
        let room = self
            .rooms
            .free_room_during(subject, slot)
            .ok_or(ResourceKind::Room)?;
        trace!(
            "{slot}: subject '{}', teacher '{}', room '{}'",
            subject.id,
            teacher.id,
            room.id
        );
        Ok(Arrangement {
            slot: slot.clone(),
            subject_id: subject.id.clone(),
            teacher_id: teacher.id.clone(),
            room_id: room.id.clone(),
        })
    }

    /// Reserves one arrangement in its subject, teacher and room.
    fn commit(&mut self, a: Arrangement) -> Result<Lesson> {
        let slots = a.slot.slots();

        let subject = self
            .subjects
            .subject_mut(&a.subject_id)
            .ok_or_else(|| unknown(ResourceKind::Subject, &a.subject_id))?;
        subject
            .assign_for(&a.slot)
            .map_err(|source| rejected(ResourceKind::Subject, &a.subject_id, source))?;

        let teacher = self
            .teachers
            .teacher_mut(&a.teacher_id)
            .ok_or_else(|| unknown(ResourceKind::Teacher, &a.teacher_id))?;
        teacher
            .assign_for(&slots)
            .map_err(|source| rejected(ResourceKind::Teacher, &a.teacher_id, source))?;

        let room = self
            .rooms
            .room_mut(&a.room_id)
            .ok_or_else(|| unknown(ResourceKind::Room, &a.room_id))?;
        room.assign_for(&slots)
            .map_err(|source| rejected(ResourceKind::Room, &a.room_id, source))?;

        let lesson = Lesson::new(a.slot, a.subject_id, a.teacher_id, a.room_id);
        Ok(match &self.group {
            Some(group) => lesson.with_group(group.clone()),
            None => lesson,
        })
    }
}

fn repeated_subject(arrangements: &[Arrangement]) -> Option<String> {
    let mut seen = BTreeSet::new();
    arrangements
        .iter()
        .find(|a| !seen.insert(a.subject_id.as_str()))
        .map(|a| a.subject_id.clone())
}

fn unknown(kind: ResourceKind, id: &str) -> SolveError {
    SolveError::UnknownResource {
        kind,
        id: id.to_string(),
    }
}

fn rejected(kind: ResourceKind, id: &str, source: ReservationError) -> SolveError {
    SolveError::AssignmentRejected {
        kind,
        id: id.to_string(),
        source,
    }
}
