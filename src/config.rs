use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{Result, ValidationError};
use crate::schedule::calendar::{default_workdays, Calendar, MAX_TOTAL_SLOTS, MAX_WEEKS};
use crate::schedule::targets::{RoundingPolicy, RATIO_BASE};

fn default_weeks() -> usize {
    1
}

fn default_days_at_work() -> u8 {
    3
}

fn default_min_office_attendance() -> usize {
    1
}

/// Inputs for one schedule generation.
///
/// Every field has a default, so `{"people": ["Ada", "Linus"]}` is a complete
/// request file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    #[serde(default)]
    pub people: Vec<String>,
    #[serde(default = "default_workdays")]
    pub workdays: Vec<String>,
    #[serde(default = "default_weeks")]
    pub weeks: usize,
    /// Office days out of five; the remaining `5 - days_at_work` are from home.
    #[serde(default = "default_days_at_work")]
    pub days_at_work: u8,
    #[serde(default = "default_min_office_attendance")]
    pub min_office_attendance: usize,
    #[serde(default)]
    pub rounding: RoundingPolicy,
    /// Fixes the random source so the same request yields the same roster.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

impl Default for ScheduleRequest {
    fn default() -> Self {
        Self {
            people: Vec::new(),
            workdays: default_workdays(),
            weeks: default_weeks(),
            days_at_work: default_days_at_work(),
            min_office_attendance: default_min_office_attendance(),
            rounding: RoundingPolicy::default(),
            seed: None,
            start_date: None,
        }
    }
}

impl ScheduleRequest {
    pub fn new(people: Vec<String>) -> Self {
        Self {
            people,
            ..Self::default()
        }
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let request = serde_json::from_str(&contents)?;
        Ok(request)
    }

    pub fn calendar(&self) -> Calendar {
        Calendar::new(self.weeks, self.workdays.clone()).with_start_date(self.start_date)
    }

    /// Rejects anything the generator cannot work with.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.weeks == 0 {
            return Err(ValidationError::NoWeeks);
        }
        if self.workdays.is_empty() {
            return Err(ValidationError::NoWorkdays);
        }
        let within_bounds = self
            .weeks
            .checked_mul(self.workdays.len())
            .is_some_and(|slots| slots <= MAX_TOTAL_SLOTS);
        if !within_bounds {
            return Err(ValidationError::CalendarTooLarge {
                weeks: self.weeks,
                workdays: self.workdays.len(),
                max_slots: MAX_TOTAL_SLOTS,
            });
        }

        let mut seen_days = HashSet::new();
        for (i, day) in self.workdays.iter().enumerate() {
            if day.trim().is_empty() {
                return Err(ValidationError::EmptyWorkday(i + 1));
            }
            if !seen_days.insert(day.as_str()) {
                return Err(ValidationError::DuplicateWorkday(day.clone()));
            }
        }

        let mut seen_people = HashSet::new();
        for (i, person) in self.people.iter().enumerate() {
            if person.trim().is_empty() {
                return Err(ValidationError::EmptyPerson(i + 1));
            }
            if !seen_people.insert(person.as_str()) {
                return Err(ValidationError::DuplicatePerson(person.clone()));
            }
        }

        if self.days_at_work as usize > RATIO_BASE {
            return Err(ValidationError::DaysAtWorkOutOfRange(self.days_at_work));
        }
        if self.min_office_attendance == 0 {
            return Err(ValidationError::ZeroMinimumAttendance);
        }
        if !self.people.is_empty() && self.min_office_attendance > self.people.len() {
            return Err(ValidationError::MinimumAttendanceTooHigh {
                minimum: self.min_office_attendance,
                people: self.people.len(),
            });
        }

        Ok(())
    }

    /// Normalises raw user input the way the input form does: blank and
    /// repeated names are dropped and numbers are pulled into range.
    pub fn clamped(&self) -> Self {
        let mut seen = HashSet::new();
        let people: Vec<String> = self
            .people
            .iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty() && seen.insert(p.clone()))
            .collect();

        let mut seen = HashSet::new();
        let mut workdays: Vec<String> = self
            .workdays
            .iter()
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty() && seen.insert(d.clone()))
            .collect();
        if workdays.is_empty() {
            workdays = default_workdays();
        }

        let max_attendance = people.len().max(1);

        Self {
            min_office_attendance: self.min_office_attendance.clamp(1, max_attendance),
            weeks: self.weeks.clamp(1, MAX_WEEKS),
            days_at_work: self.days_at_work.min(RATIO_BASE as u8),
            people,
            workdays,
            ..self.clone()
        }
    }
}
