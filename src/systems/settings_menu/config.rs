use std::{path::Path, time::Duration};

use bevy::prelude::*;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

const DEFAULT_CONFIG_JSON: &str = include_str!("./content/settings_menu.json");

static DEFAULT_CONFIG: Lazy<SettingsMenuConfig> = Lazy::new(|| {
    match serde_json::from_str::<SettingsMenuConfig>(DEFAULT_CONFIG_JSON) {
        Ok(config) => config,
        Err(error) => {
            warn!("failed to parse embedded settings menu config: {error}; using safe defaults");
            SettingsMenuConfig::fallback()
        }
    }
});

#[derive(Debug)]
pub enum ConfigLoadError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(error) => write!(f, "could not read settings menu config: {error}"),
            Self::Parse(error) => write!(f, "could not parse settings menu config: {error}"),
        }
    }
}

impl std::error::Error for ConfigLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(error) => Some(error),
            Self::Parse(error) => Some(error),
        }
    }
}

#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsMenuConfig {
    pub fade_ms: u64,
    pub slide_ms: u64,
    pub selection_settle_ms: u64,
    pub inactivity_timeout_secs: f32,
    pub close_on_select: bool,
    pub entries: Vec<String>,
}

impl Default for SettingsMenuConfig {
    fn default() -> Self {
        Self::fallback()
    }
}

impl SettingsMenuConfig {
    pub fn embedded() -> Self {
        DEFAULT_CONFIG.clone()
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigLoadError> {
        serde_json::from_str(json).map_err(ConfigLoadError::Parse)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let json = std::fs::read_to_string(path).map_err(ConfigLoadError::Io)?;
        Self::from_json(&json)
    }

    pub fn load_or_embedded(path: impl AsRef<Path>) -> Self {
        match Self::from_file(path.as_ref()) {
            Ok(config) => config,
            Err(error) => {
                warn!(
                    "failed to load settings menu config from {}: {error}; using embedded defaults",
                    path.as_ref().display()
                );
                Self::embedded()
            }
        }
    }

    pub fn fallback() -> Self {
        Self {
            fade_ms: 180,
            slide_ms: 240,
            selection_settle_ms: 60,
            inactivity_timeout_secs: 3.0,
            close_on_select: true,
            entries: vec![String::from("speed"), String::from("captions")],
        }
    }

    pub fn fade_duration(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }

    pub fn slide_duration(&self) -> Duration {
        Duration::from_millis(self.slide_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.selection_settle_ms)
    }

    /// Values too large for a `Duration` disable auto-hide.
    pub fn inactivity_timeout(&self) -> Duration {
        Duration::try_from_secs_f32(self.inactivity_timeout_secs.max(0.0)).unwrap_or(Duration::MAX)
    }

    pub fn instant() -> Self {
        Self {
            fade_ms: 0,
            slide_ms: 0,
            selection_settle_ms: 0,
            entries: Vec::new(),
            ..Self::fallback()
        }
    }
}
