use indexmap::IndexMap;
use serde::de;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Offer flags for one day, morning first. Kept exactly as long as they were
/// submitted; padding to three entries happens when availability is ingested.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Flags(pub Vec<bool>);

// older clients sent ints, some sent numeric strings
#[derive(Deserialize)]
#[serde(untagged)]
enum FlagRepr {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl FlagRepr {
    fn offered(self) -> Result<bool, String> {
        match self {
            Self::Bool(value) => Ok(value),
            Self::Int(value) => Ok(value != 0),
            Self::Text(text) => {
                let trimmed = text.trim();
                trimmed
                    .parse::<i64>()
                    .map(|value| value != 0)
                    .or_else(|_| trimmed.parse::<bool>())
                    .map_err(|_| format!("invalid offer flag {text:?}"))
            }
        }
    }
}

impl<'de> Deserialize<'de> for Flags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<FlagRepr>::deserialize(deserializer)?
            .into_iter()
            .map(FlagRepr::offered)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
            .map_err(de::Error::custom)
    }
}

impl Serialize for Flags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for flag in &self.0 {
            seq.serialize_element(&u8::from(*flag))?;
        }
        seq.end()
    }
}

impl From<Vec<u8>> for Flags {
    fn from(value: Vec<u8>) -> Self {
        Self(value.into_iter().map(|flag| flag != 0).collect())
    }
}

/// Day name -> offer flags, in submission order. The rota walks a
/// volunteer's days in this order, so it must survive parsing.
pub type DayOffers = IndexMap<String, Flags>;

/// Offers for both duties in one week.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Availability {
    pub translation: DayOffers,
    pub review: DayOffers,
}

#[derive(Deserialize)]
struct SplitAvailability {
    #[serde(default)]
    translation: DayOffers,
    #[serde(default)]
    review: DayOffers,
}

impl Availability {
    #[must_use]
    pub fn translation_only(translation: DayOffers) -> Self {
        Self {
            translation,
            review: DayOffers::new(),
        }
    }

    fn from_value(value: Value, allow_encoded: bool) -> Result<Self, serde_json::Error> {
        match value {
            Value::String(text) if allow_encoded => {
                let decoded = serde_json::from_str(&text.replace('\'', "\""))?;
                Self::from_value(decoded, false)
            }
            Value::Object(map) if map.contains_key("translation") || map.contains_key("review") => {
                let split: SplitAvailability = serde_json::from_value(Value::Object(map))?;
                Ok(Self {
                    translation: split.translation,
                    review: split.review,
                })
            }
            // records written before review availability existed
            Value::Object(map) => Ok(Self::translation_only(serde_json::from_value(
                Value::Object(map),
            )?)),
            other => Err(de::Error::custom(format!(
                "expected an availability map, found {other}"
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for Availability {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value, true).map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRecord {
    #[serde(alias = "user_id")]
    pub user_id: u64,
    #[serde(alias = "week_of")]
    pub week_of: String,
    pub available: Availability,
}

/// The roles a user holds, e.g. `translator_en` or `editor_he`.
///
/// Accepts either one comma separated string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "RolesRepr")]
pub struct Roles(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum RolesRepr {
    One(String),
    Many(Vec<String>),
}

impl From<RolesRepr> for Roles {
    fn from(value: RolesRepr) -> Self {
        let raw = match value {
            RolesRepr::One(role) => vec![role],
            RolesRepr::Many(roles) => roles,
        };
        Self(
            raw.iter()
                .flat_map(|role| role.split(|c: char| c == ',' || c.is_whitespace()))
                .filter(|token| !token.is_empty())
                .map(str::to_owned)
                .collect(),
        )
    }
}

impl Serialize for Roles {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.join(","))
    }
}

impl Roles {
    #[must_use]
    pub fn has(&self, role: &str) -> bool {
        self.0.iter().any(|held| held == role)
    }

    /// True if any held role contains `fragment`, e.g. `Hebrew` in `Hebrew_translator`.
    #[must_use]
    pub fn mentions(&self, fragment: &str) -> bool {
        self.0.iter().any(|held| held.contains(fragment))
    }
}

impl<S: Into<String>> FromIterator<S> for Roles {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub role: Roles,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAssignment {
    pub translator: String,
    pub reviewer: String,
}

/// Time-of-day label -> assignment, morning first.
pub type DayAssignments = IndexMap<String, SlotAssignment>;

/// Day name -> time-of-day label -> assignment.
pub type WeekAssignments = IndexMap<String, DayAssignments>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRecord {
    pub week_from: String,
    pub lang: String,
    pub schedule: WeekAssignments,
}
