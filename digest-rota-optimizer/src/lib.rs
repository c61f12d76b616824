//! Weekly translator and reviewer rota for the digest.
//!
//! Availability records are ingested into a [`WeekRoster`], translators are
//! placed by a rule engine run to a fixed point, then reviewers are handed out
//! in a forced pass followed by a workload pass.

pub mod error;
pub mod ingest;
pub mod model;
pub mod next_week;
pub mod reviewers;
pub mod roster;
pub mod schedule;
pub mod translators;

pub use error::ScheduleError;
pub use ingest::{IngestReport, Language};
pub use model::{Duty, SlotIdx, TimeOfDay, TranslatorRule, VolunteerId, VolunteerIdx, Weekday};
pub use next_week::{prepare_next_week, standard_blackout};
pub use roster::{RunReport, WeekRoster};
pub use schedule::PLACEHOLDER;
