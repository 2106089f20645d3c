//! Level table: per-wave door correctness
//!
//! Format (JSON):
//! ```json
//! { "numWaves": 2,
//!   "wave - 1": { "leftDoor": "wrong", "centerDoor": "correct", "rightDoor": "correct" },
//!   "wave - 2": { "leftDoor": "correct", "centerDoor": "wrong", "rightDoor": "wrong" } }
//! ```
//! A lane is wrong iff its value is exactly `"wrong"`; any other string is correct.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::door::Lane;

/// Level table bundled with the game
pub const DEFAULT_LEVEL_JSON: &str = include_str!("../../assets/level_info.json");

const WRONG: &str = "wrong";

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("level table is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level table must declare numWaves >= 1")]
    NoWaves,
    #[error("level table is missing \"wave - {0}\"")]
    MissingWave(usize),
    #[error("wave {wave} is missing field {field}")]
    MissingField { wave: usize, field: &'static str },
    #[error("wave {wave} field {field} must be a string")]
    InvalidField { wave: usize, field: &'static str },
}

/// Which lanes hold a wrong door for one wave (not mutually exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WaveRecord {
    pub left_wrong: bool,
    pub center_wrong: bool,
    pub right_wrong: bool,
}

impl WaveRecord {
    pub fn is_wrong(&self, lane: Lane) -> bool {
        match lane {
            Lane::Left => self.left_wrong,
            Lane::Center => self.center_wrong,
            Lane::Right => self.right_wrong,
        }
    }
}

/// Ordered wave table, indexed 1..=max_waves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WaveTable")]
pub struct LevelConfig {
    waves: Vec<WaveRecord>,
}

/// Unchecked serde shape of `LevelConfig`
#[derive(Deserialize)]
struct WaveTable {
    waves: Vec<WaveRecord>,
}

impl TryFrom<WaveTable> for LevelConfig {
    type Error = LevelError;

    fn try_from(table: WaveTable) -> Result<Self, Self::Error> {
        Self::new(table.waves)
    }
}

impl LevelConfig {
    pub fn new(waves: Vec<WaveRecord>) -> Result<Self, LevelError> {
        if waves.is_empty() {
            return Err(LevelError::NoWaves);
        }
        Ok(Self { waves })
    }

    /// The bundled level table
    pub fn bundled() -> Result<Self, LevelError> {
        Self::from_json(DEFAULT_LEVEL_JSON)
    }

    pub fn load(path: &Path) -> Result<Self, LevelError> {
        let text = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let level = Self::from_json(&text)?;
        log::info!(
            "Loaded level table from {} ({} waves)",
            path.display(),
            level.max_waves()
        );
        Ok(level)
    }

    pub fn from_json(text: &str) -> Result<Self, LevelError> {
        let root: Value = serde_json::from_str(text)?;
        let num_waves = root
            .get("numWaves")
            .and_then(Value::as_u64)
            .filter(|n| *n >= 1)
            .ok_or(LevelError::NoWaves)? as usize;

        let waves = (1..=num_waves)
            .map(|index| {
                let wave = root
                    .get(format!("wave - {index}"))
                    .ok_or(LevelError::MissingWave(index))?;
                Ok(WaveRecord {
                    left_wrong: lane_is_wrong(wave, index, "leftDoor")?,
                    center_wrong: lane_is_wrong(wave, index, "centerDoor")?,
                    right_wrong: lane_is_wrong(wave, index, "rightDoor")?,
                })
            })
            .collect::<Result<Vec<_>, LevelError>>()?;

        Self::new(waves)
    }

    pub fn max_waves(&self) -> usize {
        self.waves.len()
    }

    /// Record for a 1-based wave number; out-of-range numbers wrap into the table
    pub fn wave(&self, wave_number: usize) -> WaveRecord {
        let index = wave_number.saturating_sub(1) % self.waves.len();
        self.waves[index]
    }

    /// Wave that follows `wave_number`, wrapping to 1 after the last one
    pub fn next_wave(&self, wave_number: usize) -> usize {
        next_wave(wave_number, self.max_waves())
    }
}

/// `n + 1` while below `max_waves`, otherwise back to 1
pub fn next_wave(wave_number: usize, max_waves: usize) -> usize {
    if wave_number < max_waves {
        wave_number + 1
    } else {
        1
    }
}

fn lane_is_wrong(wave: &Value, index: usize, field: &'static str) -> Result<bool, LevelError> {
    let value = wave
        .get(field)
        .ok_or(LevelError::MissingField { wave: index, field })?;
    let value = value
        .as_str()
        .ok_or(LevelError::InvalidField { wave: index, field })?;
    Ok(value == WRONG)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SAMPLE: &str = r#"{
        "numWaves": 3,
        "wave - 1": { "leftDoor": "correct", "centerDoor": "wrong", "rightDoor": "correct" },
        "wave - 2": { "leftDoor": "wrong", "centerDoor": "correct", "rightDoor": "correct" },
        "wave - 3": { "leftDoor": "wrong", "centerDoor": "Wrong", "rightDoor": "wrong" }
    }"#;

    #[test]
    fn test_parse_sample() {
        let level = LevelConfig::from_json(SAMPLE).unwrap();
        assert_eq!(level.max_waves(), 3);
        assert!(level.wave(2).is_wrong(Lane::Left));
        assert!(!level.wave(2).is_wrong(Lane::Center));
        // Only the exact string "wrong" marks a wrong door
        assert!(!level.wave(3).is_wrong(Lane::Center));
        assert!(level.wave(3).is_wrong(Lane::Right));
    }

    #[test]
    fn test_bundled_level_parses() {
        let level = LevelConfig::bundled().unwrap();
        assert!(level.max_waves() >= 1);
    }

    #[test]
    fn test_missing_wave_is_an_error() {
        let text = r#"{ "numWaves": 2,
            "wave - 1": { "leftDoor": "wrong", "centerDoor": "correct", "rightDoor": "correct" } }"#;
        assert!(matches!(
            LevelConfig::from_json(text),
            Err(LevelError::MissingWave(2))
        ));
    }

    #[test]
    fn test_missing_and_invalid_fields() {
        let missing = r#"{ "numWaves": 1, "wave - 1": { "leftDoor": "wrong", "centerDoor": "correct" } }"#;
        assert!(matches!(
            LevelConfig::from_json(missing),
            Err(LevelError::MissingField {
                wave: 1,
                field: "rightDoor"
            })
        ));

        let invalid = r#"{ "numWaves": 1, "wave - 1": { "leftDoor": 3, "centerDoor": "correct", "rightDoor": "correct" } }"#;
        assert!(matches!(
            LevelConfig::from_json(invalid),
            Err(LevelError::InvalidField { wave: 1, .. })
        ));
    }

    #[test]
    fn test_zero_waves_rejected() {
        assert!(matches!(
            LevelConfig::from_json(r#"{ "numWaves": 0 }"#),
            Err(LevelError::NoWaves)
        ));
        assert!(matches!(
            LevelConfig::from_json("not json"),
            Err(LevelError::Parse(_))
        ));
    }

    #[test]
    fn test_serde_rejects_empty_table() {
        assert!(serde_json::from_str::<LevelConfig>(r#"{ "waves": [] }"#).is_err());

        let level = LevelConfig::from_json(SAMPLE).unwrap();
        let json = serde_json::to_string(&level).unwrap();
        assert_eq!(serde_json::from_str::<LevelConfig>(&json).unwrap(), level);
    }

    #[test]
    fn test_load_missing_file() {
        let err = LevelConfig::load(Path::new("/nonexistent/level_info.json")).unwrap_err();
        assert!(matches!(err, LevelError::Io { .. }));
    }

    proptest! {
        #[test]
        fn prop_next_wave_cycles(max in 1usize..50, n in 1usize..50) {
            prop_assume!(n <= max);
            let next = next_wave(n, max);
            if n < max {
                prop_assert_eq!(next, n + 1);
            } else {
                prop_assert_eq!(next, 1);
            }
            prop_assert!((1..=max).contains(&next));
        }

        #[test]
        fn prop_full_cycle_returns_to_start(max in 1usize..30, start in 1usize..30) {
            prop_assume!(start <= max);
            let mut n = start;
            for _ in 0..max {
                n = next_wave(n, max);
            }
            prop_assert_eq!(n, start);
        }
    }
}
