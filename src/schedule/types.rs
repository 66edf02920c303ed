use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::calendar::Calendar;
use super::targets::Targets;

/// One workday of one week
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub week: usize,
    pub day_index: usize,
    pub day: String,
}

impl Slot {
    /// Key in the form `week-day`, e.g. `0-Monday`.
    pub fn key(&self) -> String {
        format!("{}-{}", self.week, self.day)
    }
}

/// Who is in the office and who works from home on a given slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAssignment {
    pub slot: Slot,
    pub at_work: Vec<String>,
    pub working_from_home: Vec<String>,
}

impl DayAssignment {
    pub fn empty(slot: Slot) -> Self {
        Self {
            slot,
            at_work: Vec::new(),
            working_from_home: Vec::new(),
        }
    }

    pub fn is_at_work(&self, person: &str) -> bool {
        self.at_work.iter().any(|p| p == person)
    }

    pub fn is_working_from_home(&self, person: &str) -> bool {
        self.working_from_home.iter().any(|p| p == person)
    }
}

/// Assignment for every slot of the calendar, in calendar order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub days: Vec<DayAssignment>,
}

impl Roster {
    pub fn empty(calendar: &Calendar) -> Self {
        Self {
            days: calendar.slots().into_iter().map(DayAssignment::empty).collect(),
        }
    }

    pub fn get(&self, week: usize, day: &str) -> Option<&DayAssignment> {
        self.days
            .iter()
            .find(|d| d.slot.week == week && d.slot.day == day)
    }

    pub fn keys(&self) -> Vec<String> {
        self.days.iter().map(|d| d.slot.key()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DayAssignment> {
        self.days.iter()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Realized counts for one person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub name: String,
    pub at_work: usize,
    pub working_from_home: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotShortfall {
    pub slot: Slot,
    pub at_work: usize,
    pub required: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintReport {
    pub minimum_met: bool,
    pub minimum: usize,
    pub understaffed: Vec<SlotShortfall>,
}

/// Everything one generation run produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    pub calendar: Calendar,
    pub roster: Roster,
    pub tally: Vec<Tally>,
    pub report: ConstraintReport,
    pub targets: Targets,
    /// Placements made by the round-robin fill after random sampling gave up.
    pub fallback_placements: usize,
    pub generated_at: DateTime<Utc>,
}

impl ScheduleOutcome {
    pub fn minimum_met(&self) -> bool {
        self.report.minimum_met
    }

    pub fn tally_for(&self, person: &str) -> Option<&Tally> {
        self.tally.iter().find(|t| t.name == person)
    }
}
