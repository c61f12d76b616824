//! Translator allocation.
//!
//! The rules below run in order over the whole week. Whenever one of them
//! changes something the sequence starts over from the first rule; the week is
//! done once a full pass changes nothing. Every pass that does not end the loop
//! either fills a slot or shrinks a candidate pool, so the loop is bounded by
//! the number of slots plus the total size of the translator pools.
//!
//! Known limitation: when two candidates for a slot both already translate
//! another slot that day, nothing decides between them here.

use core::cmp::Reverse;

use itertools::Itertools;
use tracing::{debug, trace};

use crate::model::{remove_candidate, SlotIdx, TimeOfDay, TranslatorRule, VolunteerIdx};
use crate::roster::WeekRoster;

/// Rule 3 looks at candidates with at least this many translations, whatever
/// the configured ceiling for Rule 5 is.
pub const LOADED_ASSIGNMENTS: usize = 3;

/// Runs the rules to a fixed point and returns how many passes that took.
pub fn allocate(roster: &mut WeekRoster) -> usize {
    let mut passes = 0;
    loop {
        passes += 1;
        trace!(passes, "translator pass");
        if assign_unique_candidates(roster) {
            continue;
        }
        if remove_same_day_candidacy(roster) {
            continue;
        }
        if relieve_loaded_candidates(roster) {
            continue;
        }
        if assign_by_priority(roster) {
            continue;
        }
        break;
    }
    debug!(passes, "translator allocation reached a fixed point");
    passes
}

/// Rule 1: a slot with a single candidate gets that candidate.
pub fn assign_unique_candidates(roster: &mut WeekRoster) -> bool {
    let mut changed = false;
    for slot in SlotIdx::all() {
        if roster.is_no_edition(slot) || roster.slot(slot).translator.is_some() {
            continue;
        }
        if let &[only] = roster.slot(slot).translator_candidates() {
            roster.set_translator(slot, only, TranslatorRule::UniqueCandidate);
            debug!(rule = 1, %slot, volunteer = %roster.volunteer(only).display_name, "assigned translator");
            changed = true;
        }
    }
    changed
}

/// Rule 2: someone translating one slot stops being a candidate for the other
/// slots that day, unless they are the last candidate left there.
pub fn remove_same_day_candidacy(roster: &mut WeekRoster) -> bool {
    let mut changed = false;
    let days = roster.days;
    for day in days {
        for slot in day.slots {
            let Some(translator) = roster.slot(slot).translator() else {
                continue;
            };
            for other in day.slots {
                if other == slot
                    || roster.is_no_edition(other)
                    || roster.slot(other).translator.is_some()
                {
                    continue;
                }
                let candidates = &mut roster.slots[other.0].translator_candidates;
                if candidates.len() > 1 && remove_candidate(candidates, translator) {
                    debug!(rule = 2, slot = %other, volunteer = %roster.volunteers[translator.0].display_name, "removed same-day candidate");
                    changed = true;
                }
            }
        }
    }
    changed
}

/// Rule 3: candidates with [`LOADED_ASSIGNMENTS`] or more translations are
/// dropped, most loaded first, until the ones left to drop are all equally
/// loaded.
pub fn relieve_loaded_candidates(roster: &mut WeekRoster) -> bool {
    let mut changed = false;
    for slot in SlotIdx::all() {
        if roster.is_no_edition(slot) || roster.slot(slot).translator.is_some() {
            continue;
        }
        let loaded: Vec<(VolunteerIdx, usize)> = roster
            .slot(slot)
            .translator_candidates
            .iter()
            .map(|candidate| (*candidate, roster.volunteer(*candidate).assigned.len()))
            .filter(|(_, assignments)| *assignments >= LOADED_ASSIGNMENTS)
            .sorted_by_key(|(_, assignments)| Reverse(*assignments))
            .collect();

        let Some(&(_, least_loaded)) = loaded.last() else {
            continue;
        };
        for (candidate, assignments) in loaded {
            if assignments <= least_loaded {
                break;
            }
            remove_candidate(&mut roster.slots[slot.0].translator_candidates, candidate);
            debug!(rule = 3, %slot, volunteer = %roster.volunteer(candidate).display_name, assignments, "removed loaded candidate");
            changed = true;
        }
    }
    changed
}

/// Slots the volunteer offered for that are still open and still count them as
/// a candidate, in the order of their own offer map.
#[must_use]
pub fn offered_and_available(roster: &WeekRoster, volunteer: VolunteerIdx) -> Vec<SlotIdx> {
    roster
        .volunteer(volunteer)
        .offered_translate
        .iter()
        .flat_map(|(day, flags)| {
            TimeOfDay::ALL
                .into_iter()
                .filter(move |time| flags[time.index()])
                .map(move |time| SlotIdx::of(*day, time))
        })
        .filter(|slot| {
            let open = roster.slot(*slot);
            !roster.is_no_edition(*slot)
                && open.translator.is_none()
                && open.translator_candidates.contains(&volunteer)
        })
        .collect()
}

/// Volunteers who can only be given two slots or fewer in total go first, in
/// ascending order of that total; everybody else shares one bucket.
const fn priority_bucket(assignments: usize, available: usize) -> usize {
    let total = assignments + available;
    if total <= 2 {
        total
    } else {
        10
    }
}

/// Volunteers below the ceiling with open offers, best first, as
/// `(volunteer, assignments, offered and available)`.
fn rank_volunteers(roster: &WeekRoster) -> Vec<(VolunteerIdx, usize, usize)> {
    let ceiling = roster.max_assignments_per_volunteer;
    roster
        .volunteers()
        .map(|(index, volunteer)| {
            (
                index,
                volunteer.assigned.len(),
                offered_and_available(roster, index).len(),
            )
        })
        .filter(|(_, assignments, available)| *assignments < ceiling && *available > 0)
        .sorted_by_key(|(_, assignments, available)| {
            (
                priority_bucket(*assignments, *available),
                *assignments,
                *available,
            )
        })
        .collect()
}

/// Rule 5: give the highest priority volunteer their first open slot.
pub fn assign_by_priority(roster: &mut WeekRoster) -> bool {
    let ranked = rank_volunteers(roster);
    for (index, assignments, available) in &ranked {
        trace!(
            rule = 5,
            volunteer = %roster.volunteer(*index).display_name,
            bucket = priority_bucket(*assignments, *available),
            assignments,
            available,
            "ranked"
        );
    }

    let Some(&(volunteer, ..)) = ranked.first() else {
        return false;
    };
    let Some(&slot) = offered_and_available(roster, volunteer).first() else {
        return false;
    };
    roster.set_translator(slot, volunteer, TranslatorRule::Priority);
    debug!(rule = 5, %slot, volunteer = %roster.volunteer(volunteer).display_name, "assigned translator");
    true
}
