pub mod types;
pub mod calendar;
pub mod targets;
pub mod generator;
pub mod attendance;

pub use types::{ConstraintReport, DayAssignment, Roster, ScheduleOutcome, Slot, SlotShortfall, Tally};
pub use calendar::{default_workdays, Calendar, DEFAULT_WORKDAYS};
pub use targets::{RoundingPolicy, Targets};
pub use generator::{generate, generate_seeded, generate_with_rng};
pub use attendance::check_attendance;
