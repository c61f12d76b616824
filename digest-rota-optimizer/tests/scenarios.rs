use digest_rota_config::RotaConfig;
use digest_rota_database::models::{AvailabilityRecord, UserRecord};
use digest_rota_optimizer::{
    SlotIdx, TimeOfDay, TranslatorRule, VolunteerId, VolunteerIdx, WeekRoster, Weekday,
    PLACEHOLDER,
};
use serde_json::json;

fn user(id: u64, name: &str, role: &str) -> UserRecord {
    serde_json::from_value(json!({ "id": id, "name": name, "role": role })).unwrap()
}

fn translator(id: u64, name: &str) -> UserRecord {
    user(id, name, "translator_en")
}

fn record(id: u64, available: serde_json::Value) -> AvailabilityRecord {
    serde_json::from_value(json!({ "userId": id, "weekOf": "March 2", "available": available }))
        .unwrap()
}

fn run(users: &[UserRecord], records: &[AvailabilityRecord]) -> WeekRoster {
    let mut roster = WeekRoster::new(&RotaConfig::default()).unwrap();
    roster.ingest(users, records);
    roster.schedule();
    roster
}

fn idx(roster: &WeekRoster, id: u64) -> VolunteerIdx {
    roster.volunteer_by_id(VolunteerId(id)).unwrap()
}

fn translated_by(roster: &WeekRoster, id: u64) -> Vec<SlotIdx> {
    roster.volunteer(idx(roster, id)).assigned().to_vec()
}

#[test]
fn lone_volunteer_gets_their_only_slot() {
    let roster = run(
        &[translator(1, "Dana Levi")],
        &[record(1, json!({ "translation": { "Monday": [1, 0, 0] } }))],
    );

    let monday_morning = roster.slot_at(Weekday::Monday, TimeOfDay::Morning);
    assert_eq!(monday_morning.translator(), Some(idx(&roster, 1)));
    assert_eq!(
        monday_morning.translator_rule(),
        Some(TranslatorRule::UniqueCandidate)
    );

    let assignment = roster.assignment(Weekday::Monday, TimeOfDay::Morning);
    assert_eq!(assignment.translator, "Dana");
    assert_eq!(assignment.reviewer, PLACEHOLDER);
}

#[test]
fn low_availability_volunteers_get_all_their_slots() {
    let roster = run(
        &[
            translator(1, "Dana Levi"),
            translator(2, "Noa Cohen"),
            translator(3, "Avi Katz"),
        ],
        &[
            record(1, json!({ "translation": { "Sunday": [1, 0, 0], "Tuesday": [0, 0, 1] } })),
            record(2, json!({ "translation": { "Monday": [0, 1, 0], "Thursday": [1, 0, 0] } })),
            record(
                3,
                json!({ "translation": {
                    "Sunday": [1, 0, 0],
                    "Monday": [0, 1, 0],
                    "Tuesday": [0, 0, 1],
                    "Thursday": [1, 0, 0]
                } }),
            ),
        ],
    );

    assert_eq!(
        translated_by(&roster, 1),
        [
            SlotIdx::of(Weekday::Sunday, TimeOfDay::Morning),
            SlotIdx::of(Weekday::Tuesday, TimeOfDay::Evening)
        ]
    );
    assert_eq!(
        translated_by(&roster, 2),
        [
            SlotIdx::of(Weekday::Monday, TimeOfDay::Afternoon),
            SlotIdx::of(Weekday::Thursday, TimeOfDay::Morning)
        ]
    );
    assert!(translated_by(&roster, 3).is_empty());
    for slot in translated_by(&roster, 1) {
        assert_eq!(roster.slot(slot).translator_rule(), Some(TranslatorRule::Priority));
    }
}

/// Avi and Noa both offer Wednesday morning. Besides that Avi alone offers
/// `avi_load` mornings and Noa alone `noa_load` afternoons, so Rule 1 gives
/// them those slots before Wednesday is decided.
fn loaded_week(avi_load: usize, noa_load: usize) -> WeekRoster {
    let days = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Thursday,
    ];
    let mut avi_offers = serde_json::Map::new();
    let mut noa_offers = serde_json::Map::new();
    for day in &days[..avi_load] {
        avi_offers.insert(day.name().to_owned(), json!([1, 0, 0]));
    }
    for day in &days[..noa_load] {
        noa_offers.insert(day.name().to_owned(), json!([0, 1, 0]));
    }
    avi_offers.insert("Wednesday".to_owned(), json!([1, 0, 0]));
    noa_offers.insert("Wednesday".to_owned(), json!([1, 0, 0]));

    let mut roster = WeekRoster::new(&RotaConfig::default()).unwrap();
    roster.ingest(
        &[translator(1, "Avi Katz"), translator(2, "Noa Cohen")],
        &[
            record(1, json!({ "translation": avi_offers })),
            record(2, json!({ "translation": noa_offers })),
        ],
    );
    roster.schedule();
    roster
}

#[test]
fn loaded_volunteer_loses_out_to_one_below_the_ceiling() {
    let roster = loaded_week(3, 0);
    let wednesday = roster.slot_at(Weekday::Wednesday, TimeOfDay::Morning);

    assert_eq!(wednesday.translator(), Some(idx(&roster, 2)));
    assert_eq!(roster.volunteer(idx(&roster, 1)).assigned().len(), 3);
    assert_eq!(
        roster.slot_at(Weekday::Tuesday, TimeOfDay::Morning).translator_rule(),
        Some(TranslatorRule::UniqueCandidate)
    );
}

#[test]
fn most_loaded_candidate_is_dropped_when_everyone_is_loaded() {
    let roster = loaded_week(4, 3);
    let wednesday = roster.slot_at(Weekday::Wednesday, TimeOfDay::Morning);

    assert_eq!(wednesday.translator(), Some(idx(&roster, 2)));
    assert_eq!(wednesday.translator_rule(), Some(TranslatorRule::UniqueCandidate));
}

#[test]
fn equally_loaded_candidates_both_stay() {
    let roster = loaded_week(3, 3);
    let wednesday = roster.slot_at(Weekday::Wednesday, TimeOfDay::Morning);

    assert_eq!(
        wednesday.translator_candidates(),
        [idx(&roster, 1), idx(&roster, 2)]
    );
    assert_eq!(wednesday.translator(), None);
}

#[test]
fn slot_without_offers_shows_placeholders() {
    let roster = run(
        &[translator(1, "Dana Levi")],
        &[record(1, json!({ "translation": { "Monday": [1, 1, 1] } }))],
    );
    let record = roster.to_record("March 2");
    let wednesday_evening = record
        .schedule
        .get("Wednesday")
        .and_then(|times| times.get("Evening"))
        .unwrap();

    assert_eq!(wednesday_evening.translator, PLACEHOLDER);
    assert_eq!(wednesday_evening.reviewer, PLACEHOLDER);
}

#[test]
fn empty_week_is_all_placeholders() {
    let roster = run(&[], &[]);
    let record = roster.to_record("March 2");

    assert_eq!(record.schedule.len(), 7);
    for (_, times) in &record.schedule {
        for (_, assignment) in times {
            assert_eq!(assignment.translator, PLACEHOLDER);
            assert_eq!(assignment.reviewer, PLACEHOLDER);
        }
    }
}

#[test]
fn editor_reviews_when_the_newcomer_already_reviews() {
    let roster = run(
        &[
            translator(1, "Dana Levi"),
            translator(2, "Noa Cohen"),
            user(3, "Moshe Bar", "translator_en,editor_en"),
        ],
        &[
            record(1, json!({ "translation": { "Sunday": [1, 0, 0], "Monday": [1, 0, 0] } })),
            record(
                2,
                json!({
                    "translation": {},
                    "review": { "Sunday": [1, 0, 0], "Monday": [1, 0, 0] }
                }),
            ),
            record(
                3,
                json!({
                    "translation": { "Tuesday": [1, 0, 0] },
                    "review": { "Monday": [1, 0, 0] }
                }),
            ),
        ],
    );

    let sunday = roster.slot_at(Weekday::Sunday, TimeOfDay::Morning);
    let monday = roster.slot_at(Weekday::Monday, TimeOfDay::Morning);
    assert_eq!(sunday.translator(), Some(idx(&roster, 1)));
    assert_eq!(monday.translator(), Some(idx(&roster, 1)));
    assert_eq!(sunday.reviewer(), Some(idx(&roster, 2)));
    assert_eq!(monday.reviewer(), Some(idx(&roster, 3)));
}

#[test]
fn offering_both_duties_keeps_a_double_reviewer_candidacy() {
    let roster = run(
        &[
            translator(1, "Yael Tal"),
            translator(2, "Xena Gal"),
            translator(3, "Quinn Oz"),
            translator(4, "Zoe Ben"),
        ],
        &[
            record(1, json!({ "translation": { "Monday": [1, 0, 0] } })),
            record(
                2,
                json!({
                    "translation": { "Monday": [1, 0, 0] },
                    "review": { "Sunday": [1, 0, 0], "Monday": [1, 0, 0] }
                }),
            ),
            record(3, json!({ "translation": {}, "review": { "Sunday": [1, 0, 0] } })),
            record(4, json!({ "translation": { "Sunday": [1, 0, 0] } })),
        ],
    );

    let sunday = roster.assignment(Weekday::Sunday, TimeOfDay::Morning);
    let monday = roster.assignment(Weekday::Monday, TimeOfDay::Morning);
    assert_eq!((sunday.translator.as_str(), sunday.reviewer.as_str()), ("Zoe", "Xena"));
    assert_eq!((monday.translator.as_str(), monday.reviewer.as_str()), ("Yael", "Xena"));
}

#[test]
fn legacy_and_encoded_records_are_scheduled() {
    let roster = run(
        &[translator(1, "Dana Levi"), translator(2, "Noa Cohen")],
        &[
            record(1, json!({ "Tuesday": [0, 1, 0] })),
            record(2, json!("{'translation': {'Tuesday': ['0', '0', '1']}, 'review': {}}")),
        ],
    );

    assert_eq!(
        roster.assignment(Weekday::Tuesday, TimeOfDay::Afternoon).translator,
        "Dana"
    );
    assert_eq!(
        roster.assignment(Weekday::Tuesday, TimeOfDay::Evening).translator,
        "Noa"
    );
}

#[test]
fn house_record_blacks_out_its_slots() {
    let roster = run(
        &[translator(1, "Dana Levi")],
        &[
            record(0, json!({ "translation": { "Wednesday": [0, 0, 1] } })),
            record(1, json!({ "translation": { "Wednesday": [0, 0, 1] } })),
        ],
    );

    assert!(roster.is_no_edition(SlotIdx::of(Weekday::Wednesday, TimeOfDay::Evening)));
    assert_eq!(
        roster.assignment(Weekday::Wednesday, TimeOfDay::Evening).translator,
        PLACEHOLDER
    );
}
