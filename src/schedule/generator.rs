use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::config::ScheduleRequest;
use crate::error::Result;
use super::attendance::check_attendance;
use super::calendar::Calendar;
use super::targets::Targets;
use super::types::{ConstraintReport, Roster, ScheduleOutcome, Tally};

/// Random draws allowed per person and pass, as a multiple of the slot count.
pub const RETRY_FACTOR: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Open,
    AtWork,
    Home,
}

/// Generates a roster using the request's seed, or the thread RNG when none is set.
pub fn generate(request: &ScheduleRequest) -> Result<ScheduleOutcome> {
    match request.seed {
        Some(seed) => generate_seeded(request, seed),
        None => generate_with_rng(request, &mut rand::thread_rng()),
    }
}

/// Same request and same seed always give the same roster.
pub fn generate_seeded(request: &ScheduleRequest, seed: u64) -> Result<ScheduleOutcome> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_with_rng(request, &mut rng)
}

/// Assigns every person to office and home slots, then checks daily attendance.
///
/// Each person is handled independently: office days are drawn first, home
/// days fill slots that are still open. Random sampling is bounded by
/// [`RETRY_FACTOR`]; once the budget runs out the remaining slots are taken
/// round-robin, so generation always terminates for feasible targets.
pub fn generate_with_rng<R: Rng + ?Sized>(
    request: &ScheduleRequest,
    rng: &mut R,
) -> Result<ScheduleOutcome> {
    request.validate()?;

    let calendar = request.calendar();
    let total_slots = calendar.total_slots();
    let targets = Targets::compute(total_slots, request.days_at_work, request.rounding);

    if request.people.is_empty() {
        info!(slots = total_slots, "No people given, returning an empty roster");
        return Ok(ScheduleOutcome {
            roster: Roster::empty(&calendar),
            tally: Vec::new(),
            report: ConstraintReport {
                minimum_met: true,
                minimum: request.min_office_attendance,
                understaffed: Vec::new(),
            },
            calendar,
            targets,
            fallback_placements: 0,
            generated_at: Utc::now(),
        });
    }

    for person in &request.people {
        targets.check_feasible(person)?;
    }

    let people_count = request.people.len();
    let mut board = vec![vec![Placement::Open; total_slots]; people_count];
    let mut fallback_placements = 0;

    for (index, row) in board.iter_mut().enumerate() {
        let offset = index * total_slots / people_count;
        fallback_placements +=
            place(row, targets.at_work, Placement::AtWork, offset, &calendar, rng);
    }
    for (index, row) in board.iter_mut().enumerate() {
        let offset = index * total_slots / people_count;
        fallback_placements += place(
            row,
            targets.working_from_home,
            Placement::Home,
            offset,
            &calendar,
            rng,
        );
    }

    let roster = build_roster(&calendar, &request.people, &board);
    let tally = build_tally(&request.people, &board);
    let report = check_attendance(&roster, request.min_office_attendance);

    if !report.minimum_met {
        warn!(
            minimum = report.minimum,
            understaffed = report.understaffed.len(),
            "Minimum office attendance is not met on every day"
        );
    }
    info!(
        people = people_count,
        slots = total_slots,
        at_work_target = targets.at_work,
        wfh_target = targets.working_from_home,
        fallback_placements,
        "Generated schedule"
    );

    Ok(ScheduleOutcome {
        calendar,
        roster,
        tally,
        report,
        targets,
        fallback_placements,
        generated_at: Utc::now(),
    })
}

/// Puts `target` marks of `kind` into open slots of one person's row.
/// Returns how many of them came from the round-robin fill.
fn place<R: Rng + ?Sized>(
    row: &mut [Placement],
    target: usize,
    kind: Placement,
    offset: usize,
    calendar: &Calendar,
    rng: &mut R,
) -> usize {
    let total = row.len();
    let budget = total * RETRY_FACTOR;
    let mut placed = 0;
    let mut draws = 0;

    while placed < target && draws < budget {
        draws += 1;
        let week = rng.gen_range(0..calendar.weeks);
        let day = rng.gen_range(0..calendar.days_per_week());
        let index = calendar.slot_index(week, day);
        if row[index] == Placement::Open {
            row[index] = kind;
            placed += 1;
        }
    }

    if placed >= target {
        return 0;
    }

    debug!(
        placed,
        target,
        draws,
        ?kind,
        "Random sampling budget exhausted, filling round-robin"
    );

    let mut filled = 0;
    for step in 0..total {
        if placed >= target {
            break;
        }
        let index = (offset + step) % total;
        if row[index] == Placement::Open {
            row[index] = kind;
            placed += 1;
            filled += 1;
        }
    }
    filled
}

fn build_roster(calendar: &Calendar, people: &[String], board: &[Vec<Placement>]) -> Roster {
    let mut roster = Roster::empty(calendar);
    for (slot, day) in roster.days.iter_mut().enumerate() {
        for (person, row) in people.iter().zip(board) {
            match row[slot] {
                Placement::AtWork => day.at_work.push(person.clone()),
                Placement::Home => day.working_from_home.push(person.clone()),
                Placement::Open => {}
            }
        }
    }
    roster
}

fn build_tally(people: &[String], board: &[Vec<Placement>]) -> Vec<Tally> {
    people
        .iter()
        .zip(board)
        .map(|(person, row)| Tally {
            name: person.clone(),
            at_work: row.iter().filter(|p| **p == Placement::AtWork).count(),
            working_from_home: row.iter().filter(|p| **p == Placement::Home).count(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScheduleError;
    use rand::rngs::mock::StepRng;

    fn request(people: &[&str], workdays: &[&str], weeks: usize, days_at_work: u8) -> ScheduleRequest {
        ScheduleRequest {
            people: people.iter().map(|s| s.to_string()).collect(),
            workdays: workdays.iter().map(|s| s.to_string()).collect(),
            weeks,
            days_at_work,
            ..ScheduleRequest::default()
        }
    }

    #[test]
    fn test_two_people_two_days_one_office_day_each() {
        let req = request(&["A", "B"], &["Mon", "Tue"], 1, 1);
        let outcome = generate_seeded(&req, 7).unwrap();

        assert_eq!(outcome.roster.len(), 2);
        for tally in &outcome.tally {
            assert_eq!(tally.at_work, 1);
            assert_eq!(tally.working_from_home, 1);
        }
        let covered = outcome.roster.iter().all(|d| !d.at_work.is_empty());
        assert_eq!(outcome.minimum_met(), covered);
    }

    #[test]
    fn test_single_person_full_office_week() {
        let req = request(&["A"], &["Mon", "Tue", "Wed", "Thu", "Fri"], 1, 5);
        let outcome = generate_seeded(&req, 1).unwrap();

        assert!(outcome.roster.iter().all(|d| d.at_work == vec!["A".to_string()]));
        assert_eq!(outcome.tally_for("A").unwrap().at_work, 5);
        assert_eq!(outcome.tally_for("A").unwrap().working_from_home, 0);
        assert!(outcome.minimum_met());
    }

    #[test]
    fn test_everyone_home_violates_minimum() {
        let req = request(&["A", "B", "C"], &["Mon", "Tue", "Wed"], 2, 0);
        let outcome = generate_seeded(&req, 3).unwrap();

        assert!(outcome.roster.iter().all(|d| d.at_work.is_empty()));
        assert!(outcome.roster.iter().all(|d| d.working_from_home.len() == 3));
        assert!(!outcome.minimum_met());
        assert_eq!(outcome.report.understaffed.len(), 6);
    }

    #[test]
    fn test_empty_people_gives_skeleton_roster() {
        let req = request(&[], &["Mon", "Tue"], 3, 3);
        let outcome = generate_seeded(&req, 0).unwrap();

        assert_eq!(outcome.roster.len(), 6);
        assert!(outcome.roster.iter().all(|d| d.at_work.is_empty() && d.working_from_home.is_empty()));
        assert!(outcome.tally.is_empty());
        assert!(outcome.minimum_met());
    }

    #[test]
    fn test_same_seed_same_roster() {
        let req = request(&["A", "B", "C", "D"], &["Mon", "Tue", "Wed", "Thu", "Fri"], 4, 3);
        let first = generate_seeded(&req, 42).unwrap();
        let second = generate_seeded(&req, 42).unwrap();

        assert_eq!(first.roster, second.roster);
        assert_eq!(first.tally, second.tally);
    }

    #[test]
    fn test_stuck_rng_falls_back_to_round_robin() {
        // A constant source keeps drawing the first slot, so every placement
        // after the first has to come from the fill.
        let req = request(&["A", "B"], &["Mon", "Tue", "Wed", "Thu", "Fri"], 2, 3);
        let mut rng = StepRng::new(0, 0);
        let outcome = generate_with_rng(&req, &mut rng).unwrap();

        assert!(outcome.fallback_placements > 0);
        for tally in &outcome.tally {
            assert_eq!(tally.at_work, 6);
            assert_eq!(tally.working_from_home, 4);
        }
        for day in outcome.roster.iter() {
            for person in &day.at_work {
                assert!(!day.is_working_from_home(person));
            }
        }
    }

    #[test]
    fn test_invalid_request_is_rejected() {
        let req = request(&["A"], &["Mon"], 0, 3);
        assert!(matches!(
            generate_seeded(&req, 1),
            Err(ScheduleError::Validation(_))
        ));
    }
}
