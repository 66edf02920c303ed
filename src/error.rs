use thiserror::Error;

/// Input problems found before any placement happens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Number of weeks must be at least 1")]
    NoWeeks,

    #[error("Calendar of {weeks} weeks x {workdays} workdays exceeds {max_slots} slots")]
    CalendarTooLarge {
        weeks: usize,
        workdays: usize,
        max_slots: usize,
    },

    #[error("At least one workday is required")]
    NoWorkdays,

    #[error("Workday name at position {0} is empty")]
    EmptyWorkday(usize),

    #[error("Workday listed twice: {0}")]
    DuplicateWorkday(String),

    #[error("Name of person {0} is empty")]
    EmptyPerson(usize),

    #[error("Person listed twice: {0}")]
    DuplicatePerson(String),

    #[error("Days at work must be between 0 and 5, got {0}")]
    DaysAtWorkOutOfRange(u8),

    #[error("Minimum office attendance must be at least 1")]
    ZeroMinimumAttendance,

    #[error("Minimum office attendance {minimum} exceeds the number of people ({people})")]
    MinimumAttendanceTooHigh { minimum: usize, people: usize },
}

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Invalid schedule request: {0}")]
    Validation(#[from] ValidationError),

    #[error(
        "Infeasible targets for {person}: {at_work} at work + {working_from_home} from home \
         needs more than the {available} available slots"
    )]
    Infeasible {
        person: String,
        at_work: usize,
        working_from_home: usize,
        available: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
