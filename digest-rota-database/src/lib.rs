pub mod error;
pub mod models;

use std::fs;
use std::path::{Path, PathBuf};

pub use error::DatabaseError;
use models::{AvailabilityRecord, ScheduleRecord, UserRecord};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Where the rota reads identities and availability from and where the
/// finished schedule goes.
pub trait Datastore {
    fn users(&self) -> Result<Vec<UserRecord>, DatabaseError>;

    fn availability_for_week(&self, week_of: &str)
        -> Result<Vec<AvailabilityRecord>, DatabaseError>;

    /// Inserts the record, replacing any existing one for the same user and week.
    fn put_availability(&mut self, record: AvailabilityRecord) -> Result<(), DatabaseError>;

    /// Stores the schedule as the live one for its week and language. A schedule
    /// that was already stored for that week is kept under a `Draft - ` label.
    fn store_schedule(&mut self, schedule: ScheduleRecord) -> Result<(), DatabaseError>;

    fn fetch_schedule(
        &self,
        week_from: &str,
        lang: &str,
    ) -> Result<Option<ScheduleRecord>, DatabaseError>;
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub users: Vec<UserRecord>,
    #[serde(default)]
    pub availability: Vec<AvailabilityRecord>,
    #[serde(default)]
    pub schedules: Vec<ScheduleRecord>,
}

impl Datastore for Snapshot {
    fn users(&self) -> Result<Vec<UserRecord>, DatabaseError> {
        Ok(self.users.clone())
    }

    fn availability_for_week(
        &self,
        week_of: &str,
    ) -> Result<Vec<AvailabilityRecord>, DatabaseError> {
        Ok(self
            .availability
            .iter()
            .filter(|record| record.week_of == week_of)
            .cloned()
            .collect())
    }

    fn put_availability(&mut self, record: AvailabilityRecord) -> Result<(), DatabaseError> {
        match self.availability.iter_mut().find(|existing| {
            existing.user_id == record.user_id && existing.week_of == record.week_of
        }) {
            Some(existing) => *existing = record,
            None => self.availability.push(record),
        }
        Ok(())
    }

    fn store_schedule(&mut self, schedule: ScheduleRecord) -> Result<(), DatabaseError> {
        for previous in self.schedules.iter_mut().filter(|previous| {
            previous.week_from == schedule.week_from && previous.lang == schedule.lang
        }) {
            debug!(week_from = %previous.week_from, lang = %previous.lang, "keeping previous schedule as draft");
            previous.week_from = format!("Draft - {}", previous.week_from);
        }
        self.schedules.push(schedule);
        Ok(())
    }

    fn fetch_schedule(
        &self,
        week_from: &str,
        lang: &str,
    ) -> Result<Option<ScheduleRecord>, DatabaseError> {
        Ok(self
            .schedules
            .iter()
            .find(|schedule| schedule.week_from == week_from && schedule.lang == lang)
            .cloned())
    }
}

/// A [`Snapshot`] that lives in a JSON file between runs.
pub struct JsonDatastore {
    path: PathBuf,
    snapshot: Snapshot,
}

impl JsonDatastore {
    /// Loads the snapshot at `path`. A missing file starts an empty datastore.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DatabaseError> {
        let path = path.as_ref().to_path_buf();
        let snapshot = match fs::read_to_string(&path) {
            Ok(contents) => {
                let deserializer = &mut serde_json::Deserializer::from_str(&contents);
                serde_path_to_error::deserialize(deserializer)?
            }
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "datastore does not exist yet, starting empty");
                Snapshot::default()
            }
            Err(source) => return Err(DatabaseError::Read { path, source }),
        };
        Ok(Self { path, snapshot })
    }

    pub fn save(&self) -> Result<(), DatabaseError> {
        let contents = serde_json::to_string_pretty(&self.snapshot)?;
        fs::write(&self.path, contents).map_err(|source| DatabaseError::Write {
            path: self.path.clone(),
            source,
        })
    }

    #[must_use]
    pub const fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
}

impl Datastore for JsonDatastore {
    fn users(&self) -> Result<Vec<UserRecord>, DatabaseError> {
        self.snapshot.users()
    }

    fn availability_for_week(
        &self,
        week_of: &str,
    ) -> Result<Vec<AvailabilityRecord>, DatabaseError> {
        self.snapshot.availability_for_week(week_of)
    }

    fn put_availability(&mut self, record: AvailabilityRecord) -> Result<(), DatabaseError> {
        self.snapshot.put_availability(record)
    }

    fn store_schedule(&mut self, schedule: ScheduleRecord) -> Result<(), DatabaseError> {
        self.snapshot.store_schedule(schedule)
    }

    fn fetch_schedule(
        &self,
        week_from: &str,
        lang: &str,
    ) -> Result<Option<ScheduleRecord>, DatabaseError> {
        self.snapshot.fetch_schedule(week_from, lang)
    }
}
