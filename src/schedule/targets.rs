use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// The work/home ratio is always expressed in days out of a five day week.
pub const RATIO_BASE: usize = 5;

/// How the fractional at-work share is turned into a whole number of slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RoundingPolicy {
    /// Keep placing until the count reaches the real-valued target.
    #[default]
    Ceil,
    HalfUp,
    Floor,
}

impl RoundingPolicy {
    /// Rounds `numerator / RATIO_BASE` without going through floating point.
    fn apply(self, numerator: usize) -> usize {
        match self {
            RoundingPolicy::Ceil => numerator.div_ceil(RATIO_BASE),
            RoundingPolicy::HalfUp => (2 * numerator + RATIO_BASE) / (2 * RATIO_BASE),
            RoundingPolicy::Floor => numerator / RATIO_BASE,
        }
    }
}

/// Per-person slot counts every person is filled up to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Targets {
    pub total_slots: usize,
    pub at_work: usize,
    pub working_from_home: usize,
}

impl Targets {
    pub fn compute(total_slots: usize, days_at_work: u8, policy: RoundingPolicy) -> Self {
        let at_work = policy.apply(total_slots * days_at_work as usize);
        Self {
            total_slots,
            at_work,
            working_from_home: total_slots.saturating_sub(at_work),
        }
    }

    /// Fails fast instead of letting the placement passes chase an unreachable count.
    ///
    /// Targets from [`Targets::compute`] on a validated request always pass;
    /// this guards `Targets` built by hand with public fields.
    pub fn check_feasible(&self, person: &str) -> Result<()> {
        if self.at_work > self.total_slots
            || self.at_work + self.working_from_home > self.total_slots
        {
            return Err(ScheduleError::Infeasible {
                person: person.to_string(),
                at_work: self.at_work,
                working_from_home: self.working_from_home,
                available: self.total_slots,
            });
        }
        Ok(())
    }
}
