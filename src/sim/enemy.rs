//! Patrolling enemy
//!
//! The rail is a non-colliding guide that descends on a long cycle (wait,
//! descend, snap back). The puppet rides the rail vertically and oscillates
//! between the left and right door x positions; it is the actual hazard.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::action::{Action, ActionKey};
use super::body::Body;
use super::door::Lane;
use super::layout::Layout;
use super::state::SimEvent;
use crate::Tuning;

/// Key of the rail's vertical cycle
pub const ENEMY_CYCLE: ActionKey = "enemy_cycle";
/// Key of the puppet's lateral oscillation
pub const PUPPET_PATROL: ActionKey = "puppet_action";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyType {
    /// Starts at the left door and heads right first
    LeftToRight,
    /// Starts at the right door and heads left first
    RightToLeft,
}

impl EnemyType {
    /// Uniform over both variants
    pub fn random(rng: &mut impl Rng) -> Self {
        if rng.random_bool(0.5) {
            EnemyType::LeftToRight
        } else {
            EnemyType::RightToLeft
        }
    }

    pub fn start_lane(self) -> Lane {
        match self {
            EnemyType::LeftToRight => Lane::Left,
            EnemyType::RightToLeft => Lane::Right,
        }
    }

    pub fn far_lane(self) -> Lane {
        match self {
            EnemyType::LeftToRight => Lane::Right,
            EnemyType::RightToLeft => Lane::Left,
        }
    }
}

#[derive(Debug)]
pub struct Enemy {
    pub kind: EnemyType,
    pub rail: Body,
    pub puppet: Body,
}

impl Enemy {
    pub fn new(kind: EnemyType, layout: &Layout, tuning: &Tuning) -> Self {
        let rail = Body::new("rail", tuning.sizes.rail)
            .at(Vec2::new(layout.center_x(), layout.enemy_top_y))
            .with_z(0);
        let puppet = Body::new("puppet", tuning.sizes.puppet)
            .at(Vec2::new(
                layout.lane_x(kind.start_lane()),
                layout.enemy_top_y,
            ))
            .with_anchor(Vec2::new(0.5, 0.0))
            .with_z(1);
        Self { kind, rail, puppet }
    }

    /// Start the vertical cycle on the rail and the patrol on the puppet
    pub fn start(&mut self, layout: &Layout, tuning: &Tuning) {
        let top = Vec2::new(layout.center_x(), layout.enemy_top_y);
        let descent = Action::move_to_y(top, layout.enemy_bottom_y, tuning.running_speed);
        self.rail.run_keyed(
            ENEMY_CYCLE,
            Action::forever(Action::sequence(vec![
                Action::wait(tuning.cycle_delay),
                descent,
                Action::emit(SimEvent::EnemyCycleCompleted),
            ])),
        );
        self.start_patrol(layout, tuning);
    }

    /// Replace the lateral oscillation with one matching the current type
    pub fn start_patrol(&mut self, layout: &Layout, tuning: &Tuning) {
        let near = Vec2::new(layout.lane_x(self.kind.start_lane()), 0.0);
        let far = Vec2::new(layout.lane_x(self.kind.far_lane()), 0.0);
        self.puppet.run_keyed(
            PUPPET_PATROL,
            Action::forever(Action::sequence(vec![
                Action::move_to_x(near, far.x, tuning.enemy_lateral_speed),
                Action::move_to_x(far, near.x, tuning.enemy_lateral_speed),
            ])),
        );
    }

    /// End of a vertical cycle: new type, back to the top, fresh patrol
    pub fn respawn(&mut self, kind: EnemyType, layout: &Layout, tuning: &Tuning) {
        self.kind = kind;
        self.rail.pos.y = layout.enemy_top_y;
        self.puppet.pos = Vec2::new(layout.lane_x(kind.start_lane()), layout.enemy_top_y);
        self.start_patrol(layout, tuning);
    }

    /// Advance both bodies; the puppet follows the rail vertically
    pub fn update(&mut self, dt: f32, events: &mut Vec<SimEvent>) {
        self.rail.update(dt, events);
        self.puppet.update(dt, events);
        self.puppet.pos.y = self.rail.pos.y;
    }
}
