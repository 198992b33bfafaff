//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web and in a JSON file on native. Game
//! rules are fixed; only presentation and audio are configurable.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::platform::SoundEffect;

/// Errors while reading or writing settings
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("settings file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("browser storage unavailable")]
    StorageUnavailable,
}

/// Where each sound effect is loaded from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundAssets {
    pub left_paddle: String,
    pub right_paddle: String,
    pub round_start: String,
}

impl Default for SoundAssets {
    fn default() -> Self {
        Self {
            left_paddle: "paddle_1.mp3".into(),
            right_paddle: "paddle_2.mp3".into(),
            round_start: "pong_start-score.mp3".into(),
        }
    }
}

impl SoundAssets {
    pub fn path(&self, effect: SoundEffect) -> &str {
        match effect {
            SoundEffect::LeftPaddleHit => &self.left_paddle,
            SoundEffect::RightPaddleHit => &self.right_paddle,
            SoundEffect::RoundStart => &self.round_start,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Mute all sound effects
    pub muted: bool,
    pub sounds: SoundAssets,

    // === Debug ===
    /// Start with the debug overlay on
    pub debug_lines: bool,
    /// Fixed RNG seed for reproducible speed bumps (random when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            muted: false,
            sounds: SoundAssets::default(),
            debug_lines: false,
            seed: None,
        }
    }
}

impl Settings {
    /// Native settings file, overridable with `PONG_SETTINGS`
    pub const DEFAULT_FILE: &'static str = "pong_settings.json";
    pub const PATH_ENV: &'static str = "PONG_SETTINGS";

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "classic_pong_settings";

    /// Volume to actually play at
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0)
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Settings file location for native builds
    pub fn file_path() -> PathBuf {
        std::env::var_os(Self::PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_FILE))
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {e}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) -> Result<(), SettingsError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(SettingsError::StorageUnavailable)?;
        storage
            .set_item(Self::STORAGE_KEY, &self.to_json()?)
            .map_err(|_| SettingsError::StorageUnavailable)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Load settings from [`Settings::file_path`], falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let path = Self::file_path();
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring {}: {e}", path.display());
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::file_path();
        self.save_to(&path)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings = Settings::from_json(r#"{ "muted": true, "seed": 42 }"#).unwrap();
        assert!(settings.muted);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.master_volume, 0.8);
        assert_eq!(settings.sounds, SoundAssets::default());
    }

    #[test]
    fn test_partial_sound_assets() {
        let settings =
            Settings::from_json(r#"{ "sounds": { "round_start": "assets/start.ogg" } }"#).unwrap();
        assert_eq!(settings.sounds.path(SoundEffect::RoundStart), "assets/start.ogg");
        assert_eq!(settings.sounds.path(SoundEffect::LeftPaddleHit), "paddle_1.mp3");
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(
            Settings::from_json("{ nope"),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!("pong_settings_{}.json", std::process::id()));
        let settings = Settings {
            master_volume: 0.25,
            debug_lines: true,
            seed: Some(7),
            ..Default::default()
        };
        settings.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("pong_settings_does_not_exist.json");
        assert!(matches!(
            Settings::load_from(&path),
            Err(SettingsError::Io(_))
        ));
    }

    #[test]
    fn test_effective_volume() {
        let mut settings = Settings {
            master_volume: 1.7,
            ..Default::default()
        };
        assert_eq!(settings.effective_volume(), 1.0);
        settings.muted = true;
        assert_eq!(settings.effective_volume(), 0.0);
    }
}
