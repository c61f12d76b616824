use digest_rota_config::get_config;
use digest_rota_database::{Datastore, JsonDatastore};
use digest_rota_optimizer::{prepare_next_week, ScheduleError, WeekRoster};
use digest_rota_telemetry::setup_telemetry;
use tracing::info;

pub fn main() -> Result<(), ScheduleError> {
    setup_telemetry();

    let config = get_config()?;
    let mut datastore = JsonDatastore::open(&config.datastore)?;

    let users = datastore.users()?;
    let records = datastore.availability_for_week(&config.week_of)?;

    let mut roster = WeekRoster::new(&config.rota)?;
    roster.ingest(&users, &records);
    let report = roster.schedule();
    info!(
        week_of = %config.week_of,
        passes = report.translator_passes,
        "rota for the week:\n{roster}"
    );

    datastore.store_schedule(roster.to_record(&config.week_of))?;
    if let Some(next_week_of) = &config.next_week_of {
        prepare_next_week(&mut datastore, &config, next_week_of)?;
    }
    datastore.save()?;
    Ok(())
}
