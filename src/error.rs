//! Error types.
//!
//! Only precondition violations and fatal consistency breaches are errors.
//! A round that simply finds no room for its lessons is reported as data
//! (see [`RoundFailure`](crate::solver::RoundFailure)), not through these types.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::TimeSlot;

/// Invalid composition of atomic slots.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotError {
    /// Composing requires at least one atomic slot.
    #[error("cannot compose an empty run of slots")]
    Empty,
    /// Adjacent slots are not consecutive periods on one day.
    #[error("slots {previous} and {next} are not consecutive periods on one day")]
    NotConsecutive {
        /// The slot before the gap.
        previous: TimeSlot,
        /// The slot after the gap.
        next: TimeSlot,
    },
    /// A run does not have the requested number of slots.
    #[error("expected a run of {expected} slots, got {actual}")]
    LengthMismatch {
        /// Requested length.
        expected: usize,
        /// Length received.
        actual: usize,
    },
}

/// Rejected batch assignment on a reservation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReservationError {
    /// The slot is already assigned or lies outside the weekly grid.
    #[error("slot {0} is not free")]
    NotFree(TimeSlot),
}

/// Which reservation category rejected a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    /// A subject's own reservation.
    Subject,
    /// A teacher.
    Teacher,
    /// A room.
    Room,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Subject => "subject",
            ResourceKind::Teacher => "teacher",
            ResourceKind::Room => "room",
        };
        f.write_str(name)
    }
}

/// Fatal internal-consistency violation.
///
/// Raised when a collaborator breaks its contract: candidate selection
/// proposes a resource that cannot accept the assignment, or the slot
/// pool hands out a run that is not contiguous. The solver stops on the
/// first such error instead of treating it as another failed round.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// Selection proposed an id its own catalog does not know.
    #[error("{kind} '{id}' proposed by selection does not exist")]
    UnknownResource {
        /// Catalog that was asked.
        kind: ResourceKind,
        /// The proposed id.
        id: String,
    },
    /// A resource refused slots that selection reported as free.
    #[error("{kind} '{id}' rejected an assignment selection deemed free: {source}")]
    AssignmentRejected {
        /// Rejecting category.
        kind: ResourceKind,
        /// Rejecting resource id.
        id: String,
        /// Underlying reservation error.
        source: ReservationError,
    },
    /// The slot pool returned a run that cannot be composed.
    #[error("slot pool returned a broken run: {0}")]
    BrokenRun(#[from] SlotError),
}

/// Result alias for fatal solver errors.
pub type Result<T> = std::result::Result<T, SolveError>;
