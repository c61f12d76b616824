use core::fmt;
use core::str::FromStr;

use crate::error::ScheduleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// The order the rota walks the week in.
    pub const ALL: [Self; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sunday => "Sunday",
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|day| day.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ScheduleError::UnknownDay(s.to_owned()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    pub const ALL: [Self; 3] = [Self::Morning, Self::Afternoon, Self::Evening];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Afternoon => "Afternoon",
            Self::Evening => "Evening",
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TimeOfDay {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|time| time.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ScheduleError::UnknownTimeOfDay(s.to_owned()))
    }
}

/// Index of a slot in the roster's slot arena. Slots are laid out day by day,
/// morning first, so ascending indices walk the week in rota order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotIdx(pub(crate) usize);

impl SlotIdx {
    pub const COUNT: usize = Weekday::ALL.len() * TimeOfDay::ALL.len();

    #[must_use]
    pub const fn of(day: Weekday, time: TimeOfDay) -> Self {
        Self(day.index() * TimeOfDay::ALL.len() + time.index())
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::COUNT).map(Self)
    }

    #[must_use]
    pub const fn day(self) -> Weekday {
        Weekday::ALL[self.0 / TimeOfDay::ALL.len()]
    }

    #[must_use]
    pub const fn time(self) -> TimeOfDay {
        TimeOfDay::ALL[self.0 % TimeOfDay::ALL.len()]
    }
}

impl fmt::Display for SlotIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day(), self.time())
    }
}

/// Index of a volunteer in the roster's volunteer arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VolunteerIdx(pub(crate) usize);

/// The stable user id the volunteer is known by outside of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VolunteerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Duty {
    Translation,
    Review,
}

/// One day's offer, morning first.
pub type DayFlags = [bool; 3];

#[derive(Debug, Clone)]
pub struct Volunteer {
    pub(crate) id: VolunteerId,
    pub(crate) display_name: String,
    pub(crate) editor: bool,
    pub(crate) offered_translate: Vec<(Weekday, DayFlags)>,
    pub(crate) offered_review: Vec<(Weekday, DayFlags)>,
    pub(crate) days_offered: usize,
    pub(crate) total_offered: usize,
    pub(crate) assigned: Vec<SlotIdx>,
    pub(crate) reviewing: Vec<SlotIdx>,
}

impl Volunteer {
    pub(crate) const fn new(id: VolunteerId, display_name: String, editor: bool) -> Self {
        Self {
            id,
            display_name,
            editor,
            offered_translate: Vec::new(),
            offered_review: Vec::new(),
            days_offered: 0,
            total_offered: 0,
            assigned: Vec::new(),
            reviewing: Vec::new(),
        }
    }

    /// Sets both offer maps once and derives the offer counters from the
    /// translation map.
    pub(crate) fn set_offered(
        &mut self,
        translate: Vec<(Weekday, DayFlags)>,
        review: Vec<(Weekday, DayFlags)>,
    ) {
        self.days_offered = translate
            .iter()
            .filter(|(_, flags)| flags.iter().any(|offered| *offered))
            .count();
        self.total_offered = translate
            .iter()
            .map(|(_, flags)| flags.iter().filter(|offered| **offered).count())
            .sum();
        self.offered_translate = translate;
        self.offered_review = review;
    }

    #[must_use]
    pub const fn id(&self) -> VolunteerId {
        self.id
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub const fn is_editor(&self) -> bool {
        self.editor
    }

    #[must_use]
    pub fn offered_translate(&self) -> &[(Weekday, DayFlags)] {
        &self.offered_translate
    }

    #[must_use]
    pub fn offered_review(&self) -> &[(Weekday, DayFlags)] {
        &self.offered_review
    }

    #[must_use]
    pub const fn days_offered(&self) -> usize {
        self.days_offered
    }

    #[must_use]
    pub const fn total_offered(&self) -> usize {
        self.total_offered
    }

    #[must_use]
    pub fn assigned(&self) -> &[SlotIdx] {
        &self.assigned
    }

    #[must_use]
    pub fn reviewing(&self) -> &[SlotIdx] {
        &self.reviewing
    }

    pub(crate) fn workload(&self) -> usize {
        self.assigned.len() + self.reviewing.len()
    }
}

/// How a translator ended up in a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslatorRule {
    UniqueCandidate,
    Priority,
}

#[derive(Debug, Clone)]
pub struct Slot {
    pub(crate) offered_translate: Vec<VolunteerIdx>,
    pub(crate) offered_review: Vec<VolunteerIdx>,
    pub(crate) translator_candidates: Vec<VolunteerIdx>,
    pub(crate) reviewer_candidates: Vec<VolunteerIdx>,
    pub(crate) translator: Option<(VolunteerIdx, TranslatorRule)>,
    pub(crate) reviewer: Option<VolunteerIdx>,
}

impl Slot {
    pub(crate) const fn new() -> Self {
        Self {
            offered_translate: Vec::new(),
            offered_review: Vec::new(),
            translator_candidates: Vec::new(),
            reviewer_candidates: Vec::new(),
            translator: None,
            reviewer: None,
        }
    }

    /// A translation offer makes the volunteer a candidate for both duties, a
    /// review offer only for review. Every offer adds a reviewer candidacy, so
    /// offering both duties puts the volunteer in the reviewer pool twice.
    pub(crate) fn add_offer(&mut self, volunteer: VolunteerIdx, duty: Duty) {
        match duty {
            Duty::Translation => {
                self.offered_translate.push(volunteer);
                self.translator_candidates.push(volunteer);
            }
            Duty::Review => self.offered_review.push(volunteer),
        }
        self.reviewer_candidates.push(volunteer);
    }

    #[must_use]
    pub fn offered_translate(&self) -> &[VolunteerIdx] {
        &self.offered_translate
    }

    #[must_use]
    pub fn offered_review(&self) -> &[VolunteerIdx] {
        &self.offered_review
    }

    #[must_use]
    pub fn translator_candidates(&self) -> &[VolunteerIdx] {
        &self.translator_candidates
    }

    #[must_use]
    pub fn reviewer_candidates(&self) -> &[VolunteerIdx] {
        &self.reviewer_candidates
    }

    #[must_use]
    pub fn translator(&self) -> Option<VolunteerIdx> {
        self.translator.map(|(volunteer, _)| volunteer)
    }

    #[must_use]
    pub fn translator_rule(&self) -> Option<TranslatorRule> {
        self.translator.map(|(_, rule)| rule)
    }

    #[must_use]
    pub const fn reviewer(&self) -> Option<VolunteerIdx> {
        self.reviewer
    }
}

/// Removes the first occurrence from a translator pool. Returns whether
/// anything was removed.
pub(crate) fn remove_candidate(pool: &mut Vec<VolunteerIdx>, volunteer: VolunteerIdx) -> bool {
    let Some(position) = pool.iter().position(|candidate| *candidate == volunteer) else {
        return false;
    };
    pool.remove(position);
    true
}

/// Removes every occurrence. Reviewer pools can hold a volunteer twice.
pub(crate) fn withdraw(pool: &mut Vec<VolunteerIdx>, volunteer: VolunteerIdx) {
    pool.retain(|candidate| *candidate != volunteer);
}

#[derive(Debug, Clone, Copy)]
pub struct Day {
    pub weekday: Weekday,
    pub slots: [SlotIdx; 3],
}

impl Day {
    pub(crate) fn new(weekday: Weekday) -> Self {
        Self {
            weekday,
            slots: TimeOfDay::ALL.map(|time| SlotIdx::of(weekday, time)),
        }
    }
}

/// Pads or truncates a submitted flag vector to one flag per time of day.
pub(crate) fn pad_flags(flags: &[bool]) -> DayFlags {
    let mut padded = [false; 3];
    for (slot, flag) in padded.iter_mut().zip(flags) {
        *slot = *flag;
    }
    padded
}
