//! Rotating office / work-from-home schedules.
//!
//! Given a list of people, a calendar of weeks and workdays, an office-day
//! ratio and a minimum daily office attendance, [`schedule::generate`]
//! produces a roster, per-person tallies and an attendance report.

pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod parser;
pub mod schedule;
pub mod web;

pub use config::ScheduleRequest;
pub use error::{Result, ScheduleError, ValidationError};
pub use schedule::{generate, generate_seeded, generate_with_rng, ScheduleOutcome};
