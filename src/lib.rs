//! Inside The Hat - a lane-picking arcade runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (actions, collisions, wave and tutorial state)
//! - `platform`: Narrow service traits for audio, ads and key-value storage
//! - `persistence`: Key-value store implementations
//! - `records`: Best score and tutorial flag
//! - `tuning`: Data-driven game balance
//! - `renderer`: Render snapshot derived from logical state

pub mod audio;
pub mod persistence;
pub mod platform;
pub mod records;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use records::Records;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants (defaults for `Tuning`)
pub mod consts {
    /// Vertical speed of doors, wall and enemy rail (pixels/s)
    pub const RUNNING_SPEED: f32 = 250.0;
    /// Rabbit lateral speed (pixels/s)
    pub const RABBIT_SPEED: f32 = 360.0;
    /// Puppet lateral speed (pixels/s)
    pub const ENEMY_LATERAL_SPEED: f32 = 250.0;

    /// Parallax speeds (pixels/s)
    pub const BACKGROUND_SPEED: f32 = 250.0;
    pub const TREES_SPEED: f32 = 450.0;

    /// Pause at the top of every door/wall/enemy cycle (seconds)
    pub const CYCLE_DELAY: f32 = 2.0;

    pub const MAX_LIFE_POINTS: u8 = 10;
    pub const SCORE_PER_WAVE: u32 = 10;

    /// Rabbit animation clips
    pub const JUMP_FRAMES: u32 = 11;
    pub const SMASH_FRAMES: u32 = 11;
    pub const CLIP_FRAME_TIME: f32 = 0.05;

    /// Tutorial timing (seconds)
    pub const TUTORIAL_INTRO_DELAY: f32 = 1.0;
    pub const TUTORIAL_SECOND_TAP_DELAY: f32 = 4.25;
    pub const TUTORIAL_RUN_DELAY: f32 = 2.25;
    pub const TUTORIAL_OUTRO_DELAY: f32 = 1.25;

    /// Portrait phone screen
    pub const SCREEN_WIDTH: f32 = 375.0;
    pub const SCREEN_HEIGHT: f32 = 667.0;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// Duration of a constant-speed move between two points
///
/// `speed` must be positive; `Tuning::validate` guarantees it for every
/// configured speed. Zero distance yields zero duration.
#[inline]
pub fn travel_time(from: Vec2, to: Vec2, speed: f32) -> f32 {
    debug_assert!(speed > 0.0, "speed must be positive");
    distance(from, to) / speed
}
