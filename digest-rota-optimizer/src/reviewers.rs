//! Reviewer allocation, once the translators are fixed.
//!
//! There is no target number of reviews per volunteer; the aim is to cover as
//! many slots as possible. A first pass makes the assignments that are forced,
//! the second hands out the rest by workload.

use itertools::Itertools;
use tracing::{debug, warn};

use crate::model::{withdraw, SlotIdx, VolunteerIdx};
use crate::roster::WeekRoster;

/// An available editor does not take a review from a volunteer with fewer
/// translations than this who is not reviewing anything else yet.
pub const EDITOR_YIELDS_BELOW_TRANSLATIONS: usize = 3;

pub fn allocate(roster: &mut WeekRoster) {
    assign_forced(roster);
    debug!("forced reviewer assignments done");
    assign_by_workload(roster);
}

/// Pass A: nobody reviews their own translation or a slot on a day they
/// translate; a slot left with a single candidate gets that candidate.
pub fn assign_forced(roster: &mut WeekRoster) {
    let slots: Vec<SlotIdx> = roster.edition_slots().collect();
    for slot in slots {
        if let Some(translator) = roster.slot(slot).translator() {
            withdraw(&mut roster.slots[slot.0].reviewer_candidates, translator);
        }
        if roster.slot(slot).reviewer_candidates.is_empty() {
            warn!(%slot, "no viable reviewer candidates");
            continue;
        }

        let same_day_translators: Vec<VolunteerIdx> = roster
            .day(slot.day())
            .slots
            .iter()
            .filter_map(|other| roster.slot(*other).translator())
            .collect();
        for translator in same_day_translators {
            withdraw(&mut roster.slots[slot.0].reviewer_candidates, translator);
        }

        let forced = match roster.slot(slot).reviewer_candidates[..] {
            [] => {
                warn!(%slot, "no viable reviewer candidates");
                None
            }
            [only] => Some(only),
            _ => None,
        };
        if let Some(only) = forced {
            assign(roster, slot, only);
            debug!(%slot, reviewer = %roster.volunteer(only).display_name, "forced reviewer");
        }
    }
}

/// Pass B: the least busy candidate reviews, unless an editor is available and
/// the least busy candidate already has reviews or enough translations.
pub fn assign_by_workload(roster: &mut WeekRoster) {
    let slots: Vec<SlotIdx> = roster.edition_slots().collect();
    for slot in slots {
        if roster.slot(slot).reviewer.is_some() {
            continue;
        }
        let Some(reviewer) = choose_reviewer(roster, slot) else {
            warn!(%slot, "no viable reviewer candidates");
            continue;
        };
        assign(roster, slot, reviewer);
        debug!(%slot, reviewer = %roster.volunteer(reviewer).display_name, "assigned reviewer");
    }
}

fn choose_reviewer(roster: &WeekRoster, slot: SlotIdx) -> Option<VolunteerIdx> {
    let candidates: Vec<VolunteerIdx> = roster
        .slot(slot)
        .reviewer_candidates
        .iter()
        .copied()
        .sorted_by_key(|candidate| roster.volunteer(*candidate).workload())
        .collect();
    let least_busy = *candidates.first()?;
    if candidates.len() == 1 {
        return Some(least_busy);
    }

    let Some(editor) = candidates
        .iter()
        .copied()
        .find(|candidate| roster.volunteer(*candidate).editor)
    else {
        return Some(least_busy);
    };
    let least_busy_volunteer = roster.volunteer(least_busy);
    if least_busy_volunteer.reviewing.is_empty()
        && least_busy_volunteer.assigned.len() < EDITOR_YIELDS_BELOW_TRANSLATIONS
    {
        Some(least_busy)
    } else {
        Some(editor)
    }
}

/// Sets the reviewer and drops them from the other open slots that day.
fn assign(roster: &mut WeekRoster, slot: SlotIdx, reviewer: VolunteerIdx) {
    roster.set_reviewer(slot, reviewer);
    let same_day = roster.day(slot.day()).slots;
    for other in same_day {
        if roster.slot(other).reviewer.is_none() {
            withdraw(&mut roster.slots[other.0].reviewer_candidates, reviewer);
        }
    }
}
