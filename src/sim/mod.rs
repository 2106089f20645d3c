//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only comes in through `TickInput::now`
//! - Seeded RNG only
//! - Stable iteration order (lanes left to right, bodies in a fixed order)
//! - No rendering or platform dependencies beyond the `Services` traits

pub mod action;
pub mod body;
pub mod collision;
pub mod door;
pub mod enemy;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod level;
pub mod parallax;
pub mod state;
pub mod tick;
pub mod tutorial;
pub mod wave;

#[cfg(test)]
pub(crate) mod testing;

pub use action::{Action, ActionKey, ActionSet};
pub use body::{Body, Clip, Sprite};
pub use collision::Contact;
pub use door::{Correctness, Door, Doors, Lane};
pub use enemy::{Enemy, EnemyType};
pub use geometry::Rect;
pub use input::TapTarget;
pub use layout::Layout;
pub use level::{LevelConfig, LevelError, WaveRecord};
pub use parallax::{FrameClock, ParallaxBand};
pub use state::{DoorOutcome, GamePhase, GameState, LifeBar, PauseReason, SimEvent};
pub use tick::{TickInput, tick};
pub use tutorial::{Tutorial, TutorialCue, TutorialOverlay, TutorialStep};
