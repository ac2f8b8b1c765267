//! Weekly grid model.
//!
//! The timetable is laid out on a fixed grid: a set of teaching days,
//! each split into the same number of equally long periods. The grid
//! defines the slot universe every reservation starts from.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::TimeSlot;

/// Day of the week, ordered Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All days in order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Three-letter abbreviation.
    pub fn short_name(self) -> &'static str {
        match self {
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
            Weekday::Saturday => "Sat",
            Weekday::Sunday => "Sun",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// The fixed weekly grid of teaching periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekGrid {
    /// Teaching days.
    pub days: Vec<Weekday>,
    /// Periods per teaching day, numbered from 0.
    pub periods_per_day: u8,
    /// Length of one period in minutes.
    pub period_minutes: u32,
}

impl WeekGrid {
    /// Creates a grid over the given days.
    pub fn new(days: impl IntoIterator<Item = Weekday>, periods_per_day: u8) -> Self {
        let mut days: Vec<Weekday> = days.into_iter().collect();
        days.sort();
        days.dedup();
        Self {
            days,
            periods_per_day,
            period_minutes: 45,
        }
    }

    /// Sets the period length.
    pub fn with_period_minutes(mut self, minutes: u32) -> Self {
        self.period_minutes = minutes;
        self
    }

    /// Every atomic slot of the week, in (day, period) order.
    pub fn slots(&self) -> BTreeSet<TimeSlot> {
        self.days
            .iter()
            .flat_map(|&day| (0..self.periods_per_day).map(move |p| TimeSlot::new(day, p)))
            .collect()
    }

    /// Number of atomic slots in the week.
    pub fn slot_count(&self) -> usize {
        self.days.len() * self.periods_per_day as usize
    }

    /// Whether a slot lies on the grid.
    pub fn contains(&self, slot: &TimeSlot) -> bool {
        slot.period < self.periods_per_day && self.days.contains(&slot.day)
    }

    /// Minutes covered by `periods` consecutive periods.
    #[inline]
    pub fn minutes_for(&self, periods: usize) -> i64 {
        periods as i64 * self.period_minutes as i64
    }
}

impl Default for WeekGrid {
    /// Monday to Friday, eight 45-minute periods.
    fn default() -> Self {
        Self::new(Weekday::ALL[..5].iter().copied(), 8)
    }
}
