//! Host settings
//!
//! Read from a JSON file at startup. A missing or unreadable file falls back
//! to defaults, and any field left out keeps its default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Tuning;
use crate::sim::level::{LevelConfig, LevelError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Level table; the bundled one when unset
    pub level_path: Option<PathBuf>,
    /// Directory holding the sound files
    pub audio_dir: PathBuf,
    /// Key-value store backing the records
    pub save_path: PathBuf,
    /// Fixed seed for reproducible runs; random when unset
    pub seed: Option<u64>,
    pub sound_on: bool,
    /// Length of a headless run, in 60 Hz frames
    pub frames: u32,
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level_path: None,
            audio_dir: PathBuf::from("assets/sounds"),
            save_path: PathBuf::from("inside_the_hat_save.json"),
            seed: None,
            sound_on: true,
            frames: 60 * 60,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, defaulting on any failure
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("Invalid settings in {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(err) => {
                log::info!("Using default settings ({}: {err})", path.display());
                Self::default()
            }
        }
    }

    /// The configured level table, or the bundled one
    pub fn level(&self) -> Result<LevelConfig, LevelError> {
        match &self.level_path {
            Some(path) => LevelConfig::load(path),
            None => LevelConfig::bundled(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("nope.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "seed": 7, "tuning": { "rabbit_speed": 400.0 } }"#).unwrap();

        let settings = Settings::load(&path);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.tuning.rabbit_speed, 400.0);
        assert_eq!(settings.tuning.running_speed, Tuning::default().running_speed);
        assert!(settings.sound_on);
    }

    #[test]
    fn test_garbage_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn test_level_falls_back_to_bundled() {
        let settings = Settings::default();
        assert_eq!(settings.level().unwrap().max_waves(), 10);

        let broken = Settings {
            level_path: Some(PathBuf::from("/definitely/not/here.json")),
            ..Default::default()
        };
        assert!(matches!(broken.level(), Err(LevelError::Io { .. })));
    }
}
