//! Session settings and preferences
//!
//! Persisted separately from the simulation itself, as a small JSON file next
//! to the executable. Everything here is optional sugar for the driver; the
//! sim takes its seed and cheat flags explicitly.

use serde::{Deserialize, Serialize};

/// Session settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Fixed run seed; `None` seeds from the wall clock
    pub seed: Option<u64>,
    /// Start with the invincibility cheat already enabled
    pub start_invincible: bool,
    /// Log a HUD status line once per second while the demo runs
    pub log_status: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            start_invincible: false,
            log_status: true,
        }
    }
}

impl Settings {
    /// Settings file next to the working directory
    const FILE_NAME: &'static str = "tank-arena.settings.json";

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        match std::fs::read_to_string(Self::FILE_NAME) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", Self::FILE_NAME);
                    settings
                }
                Err(e) => {
                    log::warn!("ignoring malformed {}: {e}", Self::FILE_NAME);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Save settings to disk; failures are logged, never fatal
    pub fn save(&self) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(Self::FILE_NAME, json) {
                    log::warn!("could not save settings: {e}");
                } else {
                    log::info!("settings saved");
                }
            }
            Err(e) => log::warn!("could not serialize settings: {e}"),
        }
    }
}
