use std::collections::{BTreeSet, HashMap};

use digest_rota_config::RotaConfig;
use tracing::{debug, info, warn};

use crate::error::ScheduleError;
use crate::ingest::Language;
use crate::model::{
    Day, Slot, SlotIdx, TimeOfDay, TranslatorRule, Volunteer, VolunteerId, VolunteerIdx, Weekday,
};
use crate::{reviewers, translators};

/// One scheduling run: the week's slots, the volunteers who offered to fill
/// them and the rules' working state.
#[derive(Debug, Clone)]
pub struct WeekRoster {
    pub(crate) language: Language,
    pub(crate) max_assignments_per_volunteer: usize,
    pub(crate) house_user_id: VolunteerId,
    pub(crate) days: [Day; 7],
    pub(crate) slots: Vec<Slot>,
    pub(crate) volunteers: Vec<Volunteer>,
    pub(crate) registry: HashMap<VolunteerId, VolunteerIdx>,
    pub(crate) no_edition: BTreeSet<SlotIdx>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub translator_passes: usize,
    pub unassigned_translators: Vec<SlotIdx>,
    pub unassigned_reviewers: Vec<SlotIdx>,
}

impl WeekRoster {
    pub fn new(config: &RotaConfig) -> Result<Self, ScheduleError> {
        let mut roster = Self {
            language: Language::new(&config.language),
            max_assignments_per_volunteer: config.max_assignments_per_volunteer,
            house_user_id: VolunteerId(config.house_user_id),
            days: Weekday::ALL.map(Day::new),
            slots: SlotIdx::all().map(|_| Slot::new()).collect(),
            volunteers: Vec::new(),
            registry: HashMap::new(),
            no_edition: BTreeSet::new(),
        };
        for slot in &config.no_edition_slots {
            let day: Weekday = slot.day.parse()?;
            let time: TimeOfDay = slot.time.parse()?;
            roster.mark_no_edition(SlotIdx::of(day, time));
        }
        Ok(roster)
    }

    #[must_use]
    pub const fn language(&self) -> &Language {
        &self.language
    }

    #[must_use]
    pub const fn max_assignments_per_volunteer(&self) -> usize {
        self.max_assignments_per_volunteer
    }

    #[must_use]
    pub const fn days(&self) -> &[Day; 7] {
        &self.days
    }

    #[must_use]
    pub fn day(&self, weekday: Weekday) -> &Day {
        &self.days[weekday.index()]
    }

    #[must_use]
    pub fn slot(&self, slot: SlotIdx) -> &Slot {
        &self.slots[slot.0]
    }

    #[must_use]
    pub fn slot_at(&self, day: Weekday, time: TimeOfDay) -> &Slot {
        self.slot(SlotIdx::of(day, time))
    }

    pub fn volunteers(&self) -> impl Iterator<Item = (VolunteerIdx, &Volunteer)> {
        self.volunteers
            .iter()
            .enumerate()
            .map(|(index, volunteer)| (VolunteerIdx(index), volunteer))
    }

    #[must_use]
    pub fn volunteer(&self, volunteer: VolunteerIdx) -> &Volunteer {
        &self.volunteers[volunteer.0]
    }

    #[must_use]
    pub fn volunteer_by_id(&self, id: VolunteerId) -> Option<VolunteerIdx> {
        self.registry.get(&id).copied()
    }

    #[must_use]
    pub fn is_no_edition(&self, slot: SlotIdx) -> bool {
        self.no_edition.contains(&slot)
    }

    pub fn mark_no_edition(&mut self, slot: SlotIdx) {
        if self.no_edition.insert(slot) {
            debug!(%slot, "no edition");
        }
    }

    pub fn no_edition_slots(&self) -> impl Iterator<Item = SlotIdx> + '_ {
        self.no_edition.iter().copied()
    }

    /// Slots that need a translator and a reviewer this week.
    pub fn edition_slots(&self) -> impl Iterator<Item = SlotIdx> + '_ {
        SlotIdx::all().filter(|slot| !self.is_no_edition(*slot))
    }

    /// Appends the slot to the volunteer's assignments. A slot's translator is
    /// never replaced within a run.
    pub(crate) fn set_translator(
        &mut self,
        slot: SlotIdx,
        volunteer: VolunteerIdx,
        rule: TranslatorRule,
    ) {
        debug_assert!(self.slots[slot.0].translator.is_none());
        self.slots[slot.0].translator = Some((volunteer, rule));
        self.volunteers[volunteer.0].assigned.push(slot);
    }

    pub(crate) fn set_reviewer(&mut self, slot: SlotIdx, volunteer: VolunteerIdx) {
        debug_assert!(self.slots[slot.0].reviewer.is_none());
        self.slots[slot.0].reviewer = Some(volunteer);
        self.volunteers[volunteer.0].reviewing.push(slot);
    }

    /// Runs the translator rules to a fixed point, then hands out reviewers.
    pub fn schedule(&mut self) -> RunReport {
        let translator_passes = translators::allocate(self);
        reviewers::allocate(self);

        let unassigned_translators: Vec<SlotIdx> = self
            .edition_slots()
            .filter(|slot| self.slot(*slot).translator.is_none())
            .collect();
        let unassigned_reviewers: Vec<SlotIdx> = self
            .edition_slots()
            .filter(|slot| self.slot(*slot).reviewer.is_none())
            .collect();
        for slot in &unassigned_translators {
            warn!(%slot, "no translator");
        }
        for slot in &unassigned_reviewers {
            warn!(%slot, "no reviewer");
        }
        info!(
            translator_passes,
            unassigned_translators = unassigned_translators.len(),
            unassigned_reviewers = unassigned_reviewers.len(),
            "schedule complete"
        );

        RunReport {
            translator_passes,
            unassigned_translators,
            unassigned_reviewers,
        }
    }
}
