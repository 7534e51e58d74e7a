use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::statistics::rarity::DEFAULT_TRIALS;

pub const DEFAULT_TICK_INTERVAL_MS: u64 = 70;
pub const DEFAULT_TICK_COUNT: u32 = 13;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Json(#[from] serde_json::Error),
    #[error("`{0}` must be greater than zero")]
    Zero(&'static str),
}

/// Tunables for a roll sequence. Missing fields fall back to their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Milliseconds between animation frames.
    pub tick_interval_ms: u64,
    /// Frames per roll sequence; the last one settles.
    pub tick_count: u32,
    /// Trials behind every rarity estimate.
    pub trials: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            tick_count: DEFAULT_TICK_COUNT,
            trials: DEFAULT_TRIALS,
        }
    }
}

impl Settings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(self) -> Result<Self, SettingsError> {
        if self.tick_interval_ms == 0 {
            return Err(SettingsError::Zero("tick_interval_ms"));
        }
        if self.tick_count == 0 {
            return Err(SettingsError::Zero("tick_count"));
        }
        if self.trials == 0 {
            return Err(SettingsError::Zero("trials"));
        }
        Ok(self)
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}: {:?}", path.display(), settings);
        Ok(settings)
    }
}
