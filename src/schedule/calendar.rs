use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::types::Slot;

/// Workdays used when the request does not name its own.
pub const DEFAULT_WORKDAYS: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

/// Ten years of weekly rotation.
pub const MAX_WEEKS: usize = 520;

/// Upper bound on weeks × workdays accepted for one generation.
pub const MAX_TOTAL_SLOTS: usize = MAX_WEEKS * 7;

pub fn default_workdays() -> Vec<String> {
    DEFAULT_WORKDAYS.iter().map(|d| d.to_string()).collect()
}

/// Shape of the period being scheduled: `weeks` repetitions of the same workdays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    pub weeks: usize,
    pub workdays: Vec<String>,
    /// Monday of the first week, only used for labels.
    pub start_date: Option<NaiveDate>,
}

impl Calendar {
    pub fn new(weeks: usize, workdays: Vec<String>) -> Self {
        Self {
            weeks,
            workdays,
            start_date: None,
        }
    }

    pub fn with_start_date(mut self, start_date: Option<NaiveDate>) -> Self {
        self.start_date = start_date;
        self
    }

    pub fn days_per_week(&self) -> usize {
        self.workdays.len()
    }

    /// Saturates instead of overflowing; requests past [`MAX_TOTAL_SLOTS`]
    /// are rejected during validation.
    pub fn total_slots(&self) -> usize {
        self.checked_total_slots().unwrap_or(usize::MAX)
    }

    pub fn checked_total_slots(&self) -> Option<usize> {
        self.weeks.checked_mul(self.workdays.len())
    }

    /// Flat index of a slot; slots are stored week-major.
    pub fn slot_index(&self, week: usize, day_index: usize) -> usize {
        week * self.workdays.len() + day_index
    }

    pub fn slot_at(&self, index: usize) -> Slot {
        let days = self.workdays.len();
        let week = index / days;
        let day_index = index % days;
        Slot {
            week,
            day_index,
            day: self.workdays[day_index].clone(),
        }
    }

    /// Every slot of the calendar, week by week, each workday in order.
    pub fn slots(&self) -> Vec<Slot> {
        (0..self.total_slots()).map(|i| self.slot_at(i)).collect()
    }

    pub fn day_index(&self, day: &str) -> Option<usize> {
        self.workdays.iter().position(|d| d == day)
    }

    /// Human readable week heading, e.g. "Week 2" or "Week of 2024-03-11".
    pub fn week_label(&self, week: usize) -> String {
        match self.start_date {
            Some(start) => {
                let monday = start + Duration::days(7 * week as i64);
                format!("Week of {}", monday.format("%Y-%m-%d"))
            }
            None => format!("Week {}", week + 1),
        }
    }
}

/// Parses a `YYYY-MM-DD` date given on the command line or in a request file.
pub fn parse_start_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}
