use core::fmt::{Debug, Display};
use std::collections::BTreeMap;
use std::path::PathBuf;

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::Deserialize;

/// A `(day, time of day)` pair as written in the config file, e.g.
/// `{ day = "Friday", time = "Evening" }`.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SlotRef {
    pub day: String,
    pub time: String,
}

impl SlotRef {
    fn new(day: &str, time: &str) -> Self {
        Self {
            day: day.to_owned(),
            time: time.to_owned(),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct RotaConfig {
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_max_assignments")]
    pub max_assignments_per_volunteer: usize,
    #[serde(default)]
    pub house_user_id: u64,
    #[serde(default = "default_no_edition_slots")]
    pub no_edition_slots: Vec<SlotRef>,
}

impl Default for RotaConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            max_assignments_per_volunteer: default_max_assignments(),
            house_user_id: 0,
            no_edition_slots: default_no_edition_slots(),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub datastore: PathBuf,
    pub week_of: String,
    pub next_week_of: Option<String>,
    #[serde(default)]
    pub summer_time: bool,
    #[serde(default)]
    pub rota: RotaConfig,
    /// Full name -> day -> flags, copied into every newly prepared week.
    #[serde(default)]
    pub standing_preferences: BTreeMap<String, BTreeMap<String, Vec<u8>>>,
}

fn default_language() -> String {
    "en".to_owned()
}

const fn default_max_assignments() -> usize {
    3
}

// no edition on Friday evening and Saturday morning / afternoon
fn default_no_edition_slots() -> Vec<SlotRef> {
    vec![
        SlotRef::new("Friday", "Evening"),
        SlotRef::new("Saturday", "Morning"),
        SlotRef::new("Saturday", "Afternoon"),
    ]
}

#[derive(thiserror::Error)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Figment(#[from] figment::Error),
}

impl Debug for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

#[must_use]
pub fn figment() -> Figment {
    Figment::new()
        .merge(Toml::file("rota.toml"))
        .merge(Env::prefixed("ROTA_").split("__"))
}

pub fn get_config() -> Result<Config, ConfigError> {
    Ok(figment().extract()?)
}
