use csv::Writer;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::schedule::ScheduleOutcome;

#[derive(Serialize)]
struct RosterRow<'a> {
    key: String,
    week: usize,
    day: &'a str,
    at_work: String,
    working_from_home: String,
}

#[derive(Serialize)]
struct TallyRow<'a> {
    name: &'a str,
    at_work: usize,
    working_from_home: usize,
}

/// Writes one row per slot; names inside a cell are separated by `; `.
/// Weeks are numbered from 1 in the `week` column, the `key` keeps the
/// zero-based `week-day` form.
pub fn write_roster_csv<W: Write>(outcome: &ScheduleOutcome, writer: W) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);

    for day in outcome.roster.iter() {
        wtr.serialize(RosterRow {
            key: day.slot.key(),
            week: day.slot.week + 1,
            day: &day.slot.day,
            at_work: day.at_work.join("; "),
            working_from_home: day.working_from_home.join("; "),
        })?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_tally_csv<W: Write>(outcome: &ScheduleOutcome, writer: W) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);

    for tally in &outcome.tally {
        wtr.serialize(TallyRow {
            name: &tally.name,
            at_work: tally.at_work,
            working_from_home: tally.working_from_home,
        })?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn export_roster_csv<P: AsRef<Path>>(outcome: &ScheduleOutcome, path: P) -> Result<()> {
    write_roster_csv(outcome, File::create(path)?)
}

pub fn export_tally_csv<P: AsRef<Path>>(outcome: &ScheduleOutcome, path: P) -> Result<()> {
    write_tally_csv(outcome, File::create(path)?)
}

pub fn roster_csv_string(outcome: &ScheduleOutcome) -> Result<String> {
    let mut buf = Vec::new();
    write_roster_csv(outcome, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn export_json<P: AsRef<Path>>(outcome: &ScheduleOutcome, path: P) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, outcome)?;
    Ok(())
}
