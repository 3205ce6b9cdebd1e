use std::{fs, path::Path, time::Duration};

use log::info;
use serde::{Deserialize, Serialize};
use shared::drone_hal::{ConfigError, NavigationConfig};
use software_in_loop::SimConfig;

use crate::error::Result;

/// Everything the game binary reads from its TOML file. Every section and
/// field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub navigation: NavigationConfig,
    pub play: PlayConfig,
    pub sim: SimConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayConfig {
    /// Consecutive HOME readings needed before the game starts.
    pub home_detect_threshold: u32,
    pub home_detect_max_samples: u32,
    pub home_detect_interval_s: f32,
    pub note_unit_ms: u64,
    /// Pause between the start song and the first prompt.
    pub start_pause_s: f32,
    pub pair_settle_s: f32,
    pub fire_start_hover_s: f32,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            home_detect_threshold: 50,
            home_detect_max_samples: 1000,
            home_detect_interval_s: 0.02,
            note_unit_ms: 250,
            start_pause_s: 1.5,
            pair_settle_s: 0.2,
            fire_start_hover_s: 0.1,
        }
    }
}

impl PlayConfig {
    pub fn home_detect_interval(&self) -> Duration {
        Duration::from_secs_f32(self.home_detect_interval_s)
    }

    pub fn note_unit(&self) -> Duration {
        Duration::from_millis(self.note_unit_ms)
    }

    pub fn start_pause(&self) -> Duration {
        Duration::from_secs_f32(self.start_pause_s)
    }

    pub fn pair_settle(&self) -> Duration {
        Duration::from_secs_f32(self.pair_settle_s)
    }

    pub fn fire_start_hover(&self) -> Duration {
        Duration::from_secs_f32(self.fire_start_hover_s)
    }

    /// Rejects settings the home wait or the session timing cannot run with.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.home_detect_threshold == 0 {
            return Err(ConfigError::OutOfRange(
                "home_detect_threshold",
                "must be at least 1",
            ));
        }

        if self.home_detect_max_samples < self.home_detect_threshold {
            return Err(ConfigError::OutOfRange(
                "home_detect_max_samples",
                "must be at least home_detect_threshold",
            ));
        }

        let durations = [
            ("home_detect_interval_s", self.home_detect_interval_s),
            ("start_pause_s", self.start_pause_s),
            ("pair_settle_s", self.pair_settle_s),
            ("fire_start_hover_s", self.fire_start_hover_s),
        ];

        for (name, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::OutOfRange(name, "must be a non-negative duration"));
            }
        }

        Ok(())
    }
}

impl GameConfig {
    /// Loads `path` when given, otherwise the defaults. The navigation and
    /// play sections are validated either way.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                info!("Using config: {}", path.display());
                let content = fs::read_to_string(path)?;
                toml::from_str(&content)?
            }
            None => {
                info!("No config file given, using defaults");
                GameConfig::default()
            }
        };

        config.navigation.validate()?;
        config.play.validate()?;

        Ok(config)
    }
}
