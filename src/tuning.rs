//! Data-driven game balance
//!
//! Every field has a default from `consts`, so a tuning file only needs the
//! values it overrides.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Error, PartialEq)]
pub enum TuningError {
    #[error("{name} must be positive (got {value})")]
    NonPositive { name: &'static str, value: f32 },
    #[error("sprite size {name} must be positive in both axes (got {value:?})")]
    EmptySprite { name: &'static str, value: Vec2 },
    #[error("max_life_points must be at least 1")]
    NoLife,
}

/// Texture sizes of every body (assets are external, so sizes are configured)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteSizes {
    pub rabbit: Vec2,
    pub door: Vec2,
    pub wall: Vec2,
    pub rail: Vec2,
    pub puppet: Vec2,
    pub background: Vec2,
    pub trees: Vec2,
}

impl Default for SpriteSizes {
    fn default() -> Self {
        Self {
            rabbit: Vec2::new(64.0, 64.0),
            door: Vec2::new(90.0, 100.0),
            wall: Vec2::new(SCREEN_WIDTH, 160.0),
            rail: Vec2::new(16.0, 160.0),
            puppet: Vec2::new(56.0, 70.0),
            background: Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            trees: Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Visible frame size; origin at the bottom-left corner
    pub screen: Vec2,

    pub running_speed: f32,
    pub rabbit_speed: f32,
    pub enemy_lateral_speed: f32,
    pub background_speed: f32,
    pub trees_speed: f32,

    /// Pause at the top of each door, wall and enemy cycle
    pub cycle_delay: f32,

    pub max_life_points: u8,
    pub score_per_wave: u32,

    pub jump_frames: u32,
    pub smash_frames: u32,
    pub clip_frame_time: f32,

    pub tutorial_intro_delay: f32,
    pub tutorial_second_tap_delay: f32,
    pub tutorial_run_delay: f32,
    pub tutorial_outro_delay: f32,

    pub sizes: SpriteSizes,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen: Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            running_speed: RUNNING_SPEED,
            rabbit_speed: RABBIT_SPEED,
            enemy_lateral_speed: ENEMY_LATERAL_SPEED,
            background_speed: BACKGROUND_SPEED,
            trees_speed: TREES_SPEED,
            cycle_delay: CYCLE_DELAY,
            max_life_points: MAX_LIFE_POINTS,
            score_per_wave: SCORE_PER_WAVE,
            jump_frames: JUMP_FRAMES,
            smash_frames: SMASH_FRAMES,
            clip_frame_time: CLIP_FRAME_TIME,
            tutorial_intro_delay: TUTORIAL_INTRO_DELAY,
            tutorial_second_tap_delay: TUTORIAL_SECOND_TAP_DELAY,
            tutorial_run_delay: TUTORIAL_RUN_DELAY,
            tutorial_outro_delay: TUTORIAL_OUTRO_DELAY,
            sizes: SpriteSizes::default(),
        }
    }
}

impl Tuning {
    /// Reject values that would stall or divide by zero
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("running_speed", self.running_speed),
            ("rabbit_speed", self.rabbit_speed),
            ("enemy_lateral_speed", self.enemy_lateral_speed),
            ("background_speed", self.background_speed),
            ("trees_speed", self.trees_speed),
            ("clip_frame_time", self.clip_frame_time),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::NonPositive { name, value });
            }
        }

        let non_negative = [
            ("cycle_delay", self.cycle_delay),
            ("tutorial_intro_delay", self.tutorial_intro_delay),
            ("tutorial_second_tap_delay", self.tutorial_second_tap_delay),
            ("tutorial_run_delay", self.tutorial_run_delay),
            ("tutorial_outro_delay", self.tutorial_outro_delay),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(TuningError::NonPositive { name, value });
            }
        }

        let s = &self.sizes;
        let sprites = [
            ("screen", self.screen),
            ("rabbit", s.rabbit),
            ("door", s.door),
            ("wall", s.wall),
            ("rail", s.rail),
            ("puppet", s.puppet),
            ("background", s.background),
            ("trees", s.trees),
        ];
        for (name, value) in sprites {
            if !(value.x > 0.0 && value.y > 0.0) {
                return Err(TuningError::EmptySprite { name, value });
            }
        }

        if self.max_life_points == 0 {
            return Err(TuningError::NoLife);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(Tuning::default().validate(), Ok(()));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{ "rabbit_speed": 500.0 }"#).unwrap();
        assert_eq!(tuning.rabbit_speed, 500.0);
        assert_eq!(tuning.running_speed, RUNNING_SPEED);
        assert_eq!(tuning.sizes, SpriteSizes::default());
    }

    #[test]
    fn test_zero_speed_rejected() {
        let tuning = Tuning {
            running_speed: 0.0,
            ..Default::default()
        };
        assert_eq!(
            tuning.validate(),
            Err(TuningError::NonPositive {
                name: "running_speed",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_empty_sprite_rejected() {
        let mut tuning = Tuning::default();
        tuning.sizes.door = Vec2::new(0.0, 100.0);
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::EmptySprite { name: "door", .. })
        ));
    }
}
