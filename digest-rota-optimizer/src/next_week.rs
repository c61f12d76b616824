//! Seeds the records the following week's run starts from.

use std::collections::BTreeMap;

use digest_rota_config::Config;
use digest_rota_database::models::{Availability, AvailabilityRecord, DayOffers, Flags};
use digest_rota_database::Datastore;
use tracing::{info, warn};

use crate::error::ScheduleError;
use crate::ingest::Language;
use crate::model::Weekday;

/// No edition on Friday evening and Saturday morning, nor on Saturday
/// afternoon while summer time is in effect.
#[must_use]
pub fn standard_blackout(summer_time: bool) -> DayOffers {
    Weekday::ALL
        .into_iter()
        .map(|day| {
            let flags: Vec<u8> = match day {
                Weekday::Friday => vec![0, 0, 1],
                Weekday::Saturday if summer_time => vec![1, 1, 0],
                Weekday::Saturday => vec![1, 0, 0],
                _ => vec![0, 0, 0],
            };
            (day.name().to_owned(), Flags::from(flags))
        })
        .collect()
}

/// Config keys are sorted by name; the rota wants them in week order.
fn in_week_order(name: &str, days: &BTreeMap<String, Vec<u8>>) -> DayOffers {
    let mut known: Vec<(Weekday, &Vec<u8>)> = Vec::with_capacity(days.len());
    for (day, flags) in days {
        match day.parse::<Weekday>() {
            Ok(weekday) => known.push((weekday, flags)),
            Err(error) => warn!(name, %error, "ignoring standing preference"),
        }
    }
    known.sort_by_key(|(weekday, _)| *weekday);
    known
        .into_iter()
        .map(|(weekday, flags)| (weekday.name().to_owned(), Flags::from(flags.clone())))
        .collect()
}

/// Writes the house blackout and every standing preference for `week_of`.
/// Returns how many records were written.
pub fn prepare_next_week(
    datastore: &mut impl Datastore,
    config: &Config,
    week_of: &str,
) -> Result<usize, ScheduleError> {
    datastore.put_availability(AvailabilityRecord {
        user_id: config.rota.house_user_id,
        week_of: week_of.to_owned(),
        available: Availability::translation_only(standard_blackout(config.summer_time)),
    })?;
    let mut written = 1;

    let language = Language::new(&config.rota.language);
    let users = datastore.users()?;
    for (name, days) in &config.standing_preferences {
        let Some(user) = users
            .iter()
            .find(|user| user.name == *name && language.is_member(&user.role))
        else {
            warn!(name, "standing preference for unknown volunteer");
            continue;
        };
        datastore.put_availability(AvailabilityRecord {
            user_id: user.id,
            week_of: week_of.to_owned(),
            available: Availability::translation_only(in_week_order(name, days)),
        })?;
        written += 1;
    }

    info!(week_of, records = written, "next week prepared");
    Ok(written)
}
