use core::fmt;

use digest_rota_database::models::{DayAssignments, ScheduleRecord, SlotAssignment};

use crate::model::{TimeOfDay, VolunteerIdx, Weekday};
use crate::roster::WeekRoster;

/// Shown in place of a name when nobody was assigned.
pub const PLACEHOLDER: &str = "---";

impl WeekRoster {
    fn name_or_placeholder(&self, volunteer: Option<VolunteerIdx>) -> &str {
        volunteer.map_or(PLACEHOLDER, |volunteer| self.volunteer(volunteer).display_name())
    }

    #[must_use]
    pub fn assignment(&self, day: Weekday, time: TimeOfDay) -> SlotAssignment {
        let slot = self.slot_at(day, time);
        SlotAssignment {
            translator: self.name_or_placeholder(slot.translator()).to_owned(),
            reviewer: self.name_or_placeholder(slot.reviewer()).to_owned(),
        }
    }

    /// The finished week as stored, every day and time of day in rota order.
    #[must_use]
    pub fn to_record(&self, week_from: &str) -> ScheduleRecord {
        let schedule = self
            .days()
            .iter()
            .map(|day| {
                let times: DayAssignments = TimeOfDay::ALL
                    .into_iter()
                    .map(|time| (time.name().to_owned(), self.assignment(day.weekday, time)))
                    .collect();
                (day.weekday.name().to_owned(), times)
            })
            .collect();
        ScheduleRecord {
            week_from: week_from.to_owned(),
            lang: self.language().code().to_owned(),
            schedule,
        }
    }
}

impl fmt::Display for WeekRoster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for day in self.days() {
            writeln!(f, "{}", day.weekday)?;
            for time in TimeOfDay::ALL {
                let assignment = self.assignment(day.weekday, time);
                writeln!(f, " * {time}:")?;
                writeln!(f, "     T: {}", assignment.translator)?;
                writeln!(f, "     R: {}", assignment.reviewer)?;
            }
        }
        Ok(())
    }
}
