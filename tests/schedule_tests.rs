use rotating_schedule::schedule::calendar::MAX_WEEKS;
use rotating_schedule::schedule::{check_attendance, generate, generate_seeded, RoundingPolicy};
use rotating_schedule::{ScheduleError, ScheduleRequest, ValidationError};

fn team(size: usize) -> Vec<String> {
    (1..=size).map(|i| format!("Person {}", i)).collect()
}

fn week_request(people: usize, weeks: usize, days_at_work: u8, minimum: usize) -> ScheduleRequest {
    ScheduleRequest {
        people: team(people),
        weeks,
        days_at_work,
        min_office_attendance: minimum,
        ..ScheduleRequest::default()
    }
}

#[test]
fn test_nobody_is_double_booked() {
    for seed in 0..20 {
        let outcome = generate_seeded(&week_request(6, 3, 2, 2), seed).unwrap();
        for day in outcome.roster.iter() {
            for person in &day.at_work {
                assert!(
                    !day.is_working_from_home(person),
                    "{} is both in the office and at home on {}",
                    person,
                    day.slot.key()
                );
            }
        }
    }
}

#[test]
fn test_tallies_match_targets_and_roster() {
    for days_at_work in 0..=5 {
        let request = week_request(4, 3, days_at_work, 1);
        let outcome = generate_seeded(&request, days_at_work as u64).unwrap();
        let total_slots = 15;
        let expected_at_work = (total_slots * days_at_work as usize).div_ceil(5);

        for tally in &outcome.tally {
            assert_eq!(tally.at_work, expected_at_work);
            assert!(tally.at_work + tally.working_from_home <= total_slots);
            assert_eq!(tally.working_from_home, total_slots - tally.at_work);

            let counted = outcome.roster.iter().filter(|d| d.is_at_work(&tally.name)).count();
            assert_eq!(counted, tally.at_work);
            let counted = outcome
                .roster
                .iter()
                .filter(|d| d.is_working_from_home(&tally.name))
                .count();
            assert_eq!(counted, tally.working_from_home);
        }
    }
}

#[test]
fn test_minimum_met_flag_matches_roster() {
    for seed in 0..30 {
        let outcome = generate_seeded(&week_request(5, 2, 2, 3), seed).unwrap();
        let every_day_staffed = outcome.roster.iter().all(|d| d.at_work.len() >= 3);
        assert_eq!(outcome.minimum_met(), every_day_staffed);
        assert_eq!(check_attendance(&outcome.roster, 3), outcome.report);
    }
}

#[test]
fn test_repeated_calls_cover_same_slots() {
    let request = week_request(3, 2, 3, 1);
    let first = generate(&request).unwrap();
    let second = generate(&request).unwrap();

    assert_eq!(first.roster.keys(), second.roster.keys());
    assert_eq!(first.roster.keys()[0], "0-Monday");
    assert_eq!(first.roster.len(), 10);
}

#[test]
fn test_seed_in_request_is_reproducible() {
    let request = ScheduleRequest {
        seed: Some(1234),
        ..week_request(4, 4, 3, 1)
    };
    let first = generate(&request).unwrap();
    let second = generate(&request).unwrap();
    assert_eq!(first.roster, second.roster);
}

#[test]
fn test_no_office_days_always_fails_minimum() {
    let outcome = generate_seeded(&week_request(3, 1, 0, 1), 8).unwrap();
    assert!(!outcome.minimum_met());
    assert_eq!(outcome.report.understaffed.len(), 5);
    assert!(outcome.tally.iter().all(|t| t.at_work == 0 && t.working_from_home == 5));
}

#[test]
fn test_custom_workdays_and_rounding() {
    let request = ScheduleRequest {
        people: team(2),
        workdays: vec!["Tue".into(), "Wed".into(), "Thu".into()],
        weeks: 3,
        days_at_work: 3,
        rounding: RoundingPolicy::Floor,
        ..ScheduleRequest::default()
    };
    let outcome = generate_seeded(&request, 2).unwrap();

    // 9 slots * 3/5 = 5.4
    assert_eq!(outcome.targets.at_work, 5);
    assert_eq!(outcome.targets.working_from_home, 4);
    assert!(outcome.roster.get(2, "Thu").is_some());
    assert!(outcome.roster.get(0, "Monday").is_none());
}

#[test]
fn test_large_calendar_terminates() {
    let outcome = generate_seeded(&week_request(10, 52, 5, 10), 99).unwrap();
    assert!(outcome.minimum_met());
    assert!(outcome.tally.iter().all(|t| t.at_work == 260));
}

#[test]
fn test_validation_errors_surface() {
    let request = week_request(2, 1, 3, 5);
    match generate(&request) {
        Err(ScheduleError::Validation(ValidationError::MinimumAttendanceTooHigh { minimum, people })) => {
            assert_eq!(minimum, 5);
            assert_eq!(people, 2);
        }
        other => panic!("expected validation error, got {:?}", other.map(|o| o.report)),
    }
}

#[test]
fn test_oversized_calendar_is_rejected_not_panicking() {
    let request = ScheduleRequest {
        people: team(1),
        weeks: usize::MAX / 2,
        ..ScheduleRequest::default()
    };
    assert!(matches!(
        generate_seeded(&request, 1),
        Err(ScheduleError::Validation(ValidationError::CalendarTooLarge { .. }))
    ));

    let outcome = generate_seeded(&request.clamped(), 1).unwrap();
    assert_eq!(outcome.calendar.weeks, MAX_WEEKS);
    assert_eq!(outcome.roster.len(), MAX_WEEKS * 5);
}
