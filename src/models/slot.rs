//! Atomic and composed time slots.
//!
//! An atomic slot is one (day, period) cell of the weekly grid. A composed
//! slot is a run of strictly consecutive periods on a single day, used as
//! one scheduling unit when choosing a subject, teacher and room.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Weekday;
use crate::error::SlotError;

/// One (day, period) cell of the weekly grid.
///
/// Ordered by day, then period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Day of the week.
    pub day: Weekday,
    /// Period index within the day (0-based).
    pub period: u8,
}

impl TimeSlot {
    /// Creates a slot.
    pub fn new(day: Weekday, period: u8) -> Self {
        Self { day, period }
    }

    /// Whether `next` directly follows this slot on the same day.
    #[inline]
    pub fn is_followed_by(&self, next: &TimeSlot) -> bool {
        self.day == next.day && self.period.checked_add(1) == Some(next.period)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.day, self.period)
    }
}

/// A contiguous run of periods on one day.
///
/// Can only be built through [`ComposedSlot::compose`] or from a single
/// [`TimeSlot`], so the run is always non-empty and gap-free. Serialized as
/// the list of its atomic slots; deserializing composes that list again.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<TimeSlot>", into = "Vec<TimeSlot>")]
pub struct ComposedSlot {
    day: Weekday,
    first_period: u8,
    len: u16,
}

impl ComposedSlot {
    /// Composes consecutive atomic slots into one run.
    ///
    /// # Errors
    /// [`SlotError::Empty`] for no slots, [`SlotError::NotConsecutive`] when
    /// two neighbours are not consecutive periods of the same day.
    pub fn compose(slots: &[TimeSlot]) -> Result<Self, SlotError> {
        let first = slots.first().ok_or(SlotError::Empty)?;
        for pair in slots.windows(2) {
            if !pair[0].is_followed_by(&pair[1]) {
                return Err(SlotError::NotConsecutive {
                    previous: pair[0],
                    next: pair[1],
                });
            }
        }
        Ok(Self {
            day: first.day,
            first_period: first.period,
            len: slots.len() as u16,
        })
    }

    /// Day of the run.
    pub fn day(&self) -> Weekday {
        self.day
    }

    /// First period of the run.
    pub fn first_period(&self) -> u8 {
        self.first_period
    }

    /// Number of periods in the run.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Always false: composition rejects empty runs.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Constituent atomic slots, in order.
    pub fn slots(&self) -> Vec<TimeSlot> {
        (0..self.len)
            .map(|i| TimeSlot::new(self.day, self.first_period + i as u8))
            .collect()
    }

    /// Whether the run covers an atomic slot.
    pub fn contains(&self, slot: &TimeSlot) -> bool {
        slot.day == self.day
            && slot.period >= self.first_period
            && ((slot.period - self.first_period) as u16) < self.len
    }

    /// Whether two runs share at least one atomic slot.
    pub fn overlaps(&self, other: &ComposedSlot) -> bool {
        let end = self.first_period as u16 + self.len;
        let other_end = other.first_period as u16 + other.len;
        self.day == other.day
            && (self.first_period as u16) < other_end
            && (other.first_period as u16) < end
    }
}

impl From<TimeSlot> for ComposedSlot {
    fn from(slot: TimeSlot) -> Self {
        Self {
            day: slot.day,
            first_period: slot.period,
            len: 1,
        }
    }
}

impl TryFrom<Vec<TimeSlot>> for ComposedSlot {
    type Error = SlotError;

    fn try_from(slots: Vec<TimeSlot>) -> Result<Self, Self::Error> {
        Self::compose(&slots)
    }
}

impl From<ComposedSlot> for Vec<TimeSlot> {
    fn from(slot: ComposedSlot) -> Self {
        slot.slots()
    }
}

impl fmt::Display for ComposedSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.len == 1 {
            write!(f, "{}#{}", self.day, self.first_period)
        } else {
            let last = self.first_period as u16 + self.len - 1;
            write!(f, "{}#{}-{}", self.day, self.first_period, last)
        }
    }
}
