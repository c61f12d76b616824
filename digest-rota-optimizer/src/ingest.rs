use std::collections::HashMap;

use digest_rota_database::models::{AvailabilityRecord, DayOffers, Roles, UserRecord};
use tracing::{debug, info, warn};

use crate::model::{
    pad_flags, DayFlags, Duty, SlotIdx, TimeOfDay, Volunteer, VolunteerId, VolunteerIdx, Weekday,
};
use crate::roster::WeekRoster;

/// The digest language a rota is built for, e.g. `en` or `he`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language(String);

impl Language {
    #[must_use]
    pub fn new(code: &str) -> Self {
        Self(code.to_owned())
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Whether someone holding `roles` is on this language's team.
    #[must_use]
    pub fn is_member(&self, roles: &Roles) -> bool {
        (self.0 == "he" && roles.mentions("Hebrew"))
            || roles.has(&format!("translator_{}", self.0))
            || self.is_editor(roles)
    }

    #[must_use]
    pub fn is_editor(&self, roles: &Roles) -> bool {
        roles.has(&format!("editor_{}", self.0))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub volunteers: usize,
    /// Availability records of users who are not on this language's team.
    pub skipped_users: Vec<u64>,
    /// Records for a volunteer that was already ingested this week.
    pub duplicate_records: Vec<u64>,
    /// Team members without an availability record for the week.
    pub missing_availability: Vec<String>,
}

/// The name the rota shows, which has always been the first name.
fn display_name(full_name: &str) -> String {
    full_name
        .split_whitespace()
        .next()
        .unwrap_or(full_name)
        .to_owned()
}

/// Keeps known days in submission order, padded to three flags.
fn parse_offers(user_id: u64, offers: &DayOffers) -> Vec<(Weekday, DayFlags)> {
    let mut parsed: Vec<(Weekday, DayFlags)> = Vec::with_capacity(offers.len());
    for (day_name, flags) in offers {
        let day = match day_name.parse::<Weekday>() {
            Ok(day) => day,
            Err(error) => {
                warn!(user_id, %error, "ignoring offer");
                continue;
            }
        };
        if parsed.iter().any(|(seen, _)| *seen == day) {
            warn!(user_id, %day, "ignoring repeated offer for day");
            continue;
        }
        parsed.push((day, pad_flags(&flags.0)));
    }
    parsed
}

fn flags_for(offers: &[(Weekday, DayFlags)], day: Weekday) -> Option<&DayFlags> {
    offers
        .iter()
        .find(|(offer_day, _)| *offer_day == day)
        .map(|(_, flags)| flags)
}

impl WeekRoster {
    /// Turns the week's availability records into volunteers and candidate
    /// pools. Only users on this language's team are scheduled; the house
    /// record blacks out the slots it flags.
    pub fn ingest(
        &mut self,
        users: &[UserRecord],
        records: &[AvailabilityRecord],
    ) -> IngestReport {
        let team: HashMap<u64, &UserRecord> = users
            .iter()
            .filter(|user| self.language.is_member(&user.role))
            .map(|user| (user.id, user))
            .collect();
        let mut report = IngestReport::default();

        for record in records {
            if record.user_id == self.house_user_id.0 {
                self.apply_blackout(&record.available.translation);
                continue;
            }
            let Some(user) = team.get(&record.user_id) else {
                debug!(user_id = record.user_id, "not on the team for this language");
                report.skipped_users.push(record.user_id);
                continue;
            };
            if self.registry.contains_key(&VolunteerId(record.user_id)) {
                warn!(user_id = record.user_id, "duplicate availability record");
                report.duplicate_records.push(record.user_id);
                continue;
            }
            self.add_volunteer(user, record);
            report.volunteers += 1;
        }

        for user in users {
            if team.contains_key(&user.id)
                && user.id != self.house_user_id.0
                && !self.registry.contains_key(&VolunteerId(user.id))
            {
                warn!(name = %user.name, "no availability yet");
                report.missing_availability.push(user.name.clone());
            }
        }

        info!(
            volunteers = report.volunteers,
            skipped = report.skipped_users.len(),
            missing = report.missing_availability.len(),
            "availability ingested"
        );
        report
    }

    fn apply_blackout(&mut self, offers: &DayOffers) {
        for (day, flags) in parse_offers(self.house_user_id.0, offers) {
            for time in TimeOfDay::ALL {
                if flags[time.index()] {
                    self.mark_no_edition(SlotIdx::of(day, time));
                }
            }
        }
    }

    fn add_volunteer(&mut self, user: &UserRecord, record: &AvailabilityRecord) -> VolunteerIdx {
        let index = VolunteerIdx(self.volunteers.len());
        let mut volunteer = Volunteer::new(
            VolunteerId(user.id),
            display_name(&user.name),
            self.language.is_editor(&user.role),
        );
        volunteer.set_offered(
            parse_offers(user.id, &record.available.translation),
            parse_offers(user.id, &record.available.review),
        );
        info!(
            volunteer = %volunteer.display_name,
            total_offered = volunteer.total_offered,
            days_offered = volunteer.days_offered,
            "offers received"
        );

        for day in Weekday::ALL {
            for (offers, duty) in [
                (&volunteer.offered_translate, Duty::Translation),
                (&volunteer.offered_review, Duty::Review),
            ] {
                let Some(flags) = flags_for(offers, day) else {
                    continue;
                };
                for time in TimeOfDay::ALL {
                    if flags[time.index()] {
                        self.slots[SlotIdx::of(day, time).0].add_offer(index, duty);
                    }
                }
            }
        }

        self.registry.insert(volunteer.id, index);
        self.volunteers.push(volunteer);
        index
    }
}
