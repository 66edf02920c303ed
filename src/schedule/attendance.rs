use super::types::{ConstraintReport, Roster, SlotShortfall};

/// Checks every slot against the minimum office attendance.
///
/// Falling short is reported, never enforced: the roster is returned as is
/// and callers decide how loudly to warn.
pub fn check_attendance(roster: &Roster, minimum: usize) -> ConstraintReport {
    let understaffed: Vec<SlotShortfall> = roster
        .iter()
        .filter(|day| day.at_work.len() < minimum)
        .map(|day| SlotShortfall {
            slot: day.slot.clone(),
            at_work: day.at_work.len(),
            required: minimum,
        })
        .collect();

    ConstraintReport {
        minimum_met: understaffed.is_empty(),
        minimum,
        understaffed,
    }
}
