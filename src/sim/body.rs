//! Positioned, sized bodies with attached actions

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::action::{Action, ActionKey, ActionSet, ActionTarget};
use super::geometry::Rect;
use super::state::SimEvent;

/// Sprite clip currently shown by a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Clip {
    /// Base texture
    #[default]
    Still,
    /// Rabbit jumping loop
    Jump,
    /// Rabbit hit by a hazard
    Smash,
}

/// Logical animation frame; the renderer maps it to a texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sprite {
    pub clip: Clip,
    pub frame: u32,
}

/// A scene body
#[derive(Debug)]
pub struct Body {
    /// Role tag, e.g. `wrong_left_door`
    pub name: String,
    pub pos: Vec2,
    pub size: Vec2,
    /// Point of the frame pinned to `pos` (0..1 per axis, 0.5 = centre)
    pub anchor: Vec2,
    pub visible: bool,
    /// Draw order only
    pub z: i32,
    pub sprite: Sprite,
    pub actions: ActionSet,
}

impl Body {
    pub fn new(name: impl Into<String>, size: Vec2) -> Self {
        Self {
            name: name.into(),
            pos: Vec2::ZERO,
            size,
            anchor: Vec2::splat(0.5),
            visible: true,
            z: 0,
            sprite: Sprite::default(),
            actions: ActionSet::new(),
        }
    }

    pub fn at(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_anchor(mut self, anchor: Vec2) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_z(mut self, z: i32) -> Self {
        self.z = z;
        self
    }

    /// Screen-space bounding box
    pub fn frame(&self) -> Rect {
        Rect::anchored(self.pos, self.size, self.anchor)
    }

    pub fn run(&mut self, action: Action) {
        self.actions.run(action);
    }

    pub fn run_keyed(&mut self, key: ActionKey, action: Action) {
        self.actions.run_keyed(key, action);
    }

    pub fn cancel(&mut self, key: ActionKey) -> bool {
        self.actions.cancel(key)
    }

    /// Advance attached actions, queueing emitted events
    pub fn update(&mut self, dt: f32, events: &mut Vec<SimEvent>) {
        let Self {
            pos,
            sprite,
            actions,
            ..
        } = self;
        let mut target = ActionTarget {
            pos,
            sprite,
            events,
        };
        actions.advance(&mut target, dt);
    }
}
