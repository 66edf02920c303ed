use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::schedule::ScheduleOutcome;

/// Formats a list of names for one cell, or a dash when nobody is listed
pub fn format_names(names: &[String]) -> String {
    if names.is_empty() {
        "-".to_string()
    } else {
        names.join(", ")
    }
}

/// Renders the roster week by week in the layout used for both the terminal and text files
pub fn render_roster(outcome: &ScheduleOutcome) -> String {
    let calendar = &outcome.calendar;
    let mut out = String::new();

    for week in 0..calendar.weeks {
        out.push_str(&format!("=== {} ===\n", calendar.week_label(week)));
        for day in outcome.roster.iter().filter(|d| d.slot.week == week) {
            out.push_str(&format!("{}\n", day.slot.day));
            out.push_str(&format!("  At Work: {}\n", format_names(&day.at_work)));
            out.push_str(&format!("  WFH:     {}\n", format_names(&day.working_from_home)));
        }
        out.push('\n');
    }
    out
}

pub fn render_tally(outcome: &ScheduleOutcome) -> String {
    let mut out = String::from("Work Days Summary\n");
    for tally in &outcome.tally {
        out.push_str(&format!(
            "  {}: At Work: {}, WFH: {}\n",
            tally.name, tally.at_work, tally.working_from_home
        ));
    }
    out
}

/// Empty when the minimum is met.
pub fn render_warning(outcome: &ScheduleOutcome) -> String {
    let report = &outcome.report;
    if report.minimum_met {
        return String::new();
    }

    let mut out = format!(
        "⚠️  The minimum office attendance of {} is not met on {} day(s):\n",
        report.minimum,
        report.understaffed.len()
    );
    for shortfall in &report.understaffed {
        out.push_str(&format!(
            "  - {} {}: {} in the office\n",
            outcome.calendar.week_label(shortfall.slot.week),
            shortfall.slot.day,
            shortfall.at_work
        ));
    }
    out
}

/// Prints the roster, the per-person summary and the attendance warning
pub fn print_schedule(outcome: &ScheduleOutcome) {
    println!("\n=== Schedule ===");
    println!(
        "Targets per person: {} at work, {} from home ({} slots)",
        outcome.targets.at_work, outcome.targets.working_from_home, outcome.targets.total_slots
    );
    println!();
    print!("{}", render_roster(outcome));
    print!("{}", render_tally(outcome));

    let warning = render_warning(outcome);
    if !warning.is_empty() {
        println!();
        print!("{}", warning);
    }
}

/// Writes the schedule to a text file in the same layout as the terminal output
pub fn write_schedule_to_file<P: AsRef<Path>>(
    outcome: &ScheduleOutcome,
    path: P,
) -> Result<(), std::io::Error> {
    let mut file = File::create(path)?;

    writeln!(file, "** Schedule generated {} **", outcome.generated_at.format("%Y-%m-%d %H:%M UTC"))?;
    writeln!(file)?;
    write!(file, "{}", render_roster(outcome))?;
    write!(file, "{}", render_tally(outcome))?;
    write!(file, "{}", render_warning(outcome))?;

    Ok(())
}
