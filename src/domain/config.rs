use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::Day;

/// Configuration for a lesson-plan board.
///
/// Controls form defaults and how strictly the plans directory is scanned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Default lesson duration in minutes for newly created plans.
    default_duration_minutes: u32,

    /// Day bucket a new plan is assigned to when none is given.
    default_day: Day,

    /// Whether to allow the plans directory to contain markdown files that
    /// cannot be parsed as lesson plans.
    pub allow_unrecognised: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_duration_minutes: default_duration(),
            default_day: default_day(),
            allow_unrecognised: false,
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or
    /// if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Default lesson duration in minutes for newly created plans.
    #[must_use]
    pub const fn default_duration_minutes(&self) -> u32 {
        self.default_duration_minutes
    }

    /// Day bucket a new plan is assigned to when none is given.
    #[must_use]
    pub const fn default_day(&self) -> Day {
        self.default_day
    }

    /// Sets the default lesson duration in minutes.
    pub const fn set_default_duration_minutes(&mut self, minutes: u32) {
        self.default_duration_minutes = minutes;
    }

    /// Sets the default day bucket for new plans.
    pub const fn set_default_day(&mut self, day: Day) {
        self.default_day = day;
    }
}

const fn default_duration() -> u32 {
    60
}

const fn default_day() -> Day {
    Day::Monday
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the
/// domain type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_duration")]
        default_duration_minutes: u32,

        #[serde(default = "default_day")]
        default_day: Day,

        #[serde(default)]
        allow_unrecognised: bool,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                default_duration_minutes,
                default_day,
                allow_unrecognised,
            } => Self {
                default_duration_minutes,
                default_day,
                allow_unrecognised,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            default_duration_minutes: config.default_duration_minutes,
            default_day: config.default_day,
            allow_unrecognised: config.allow_unrecognised,
        }
    }
}
