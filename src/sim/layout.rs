//! Fixed scene positions derived from screen and sprite sizes

use glam::Vec2;

use super::door::Lane;
use crate::Tuning;

/// Where everything starts and ends its motion
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub screen: Vec2,
    /// Door x per lane (left, center, right)
    pub lane_x: [f32; 3],
    pub rabbit_home: Vec2,
    /// Door centre just above the screen
    pub door_top_y: f32,
    /// Door centre once it has passed the player
    pub door_bottom_y: f32,
    pub wall_top_y: f32,
    pub wall_bottom_y: f32,
    /// Rail and puppet share the wall's vertical span
    pub enemy_top_y: f32,
    pub enemy_bottom_y: f32,
}

impl Layout {
    pub fn new(tuning: &Tuning) -> Self {
        let screen = tuning.screen;
        let sizes = &tuning.sizes;
        let center_x = screen.x / 2.0;
        // Side doors sit a door and a quarter away from the centre lane
        let lane_offset = 25.0 * sizes.door.x / 20.0;

        Self {
            screen,
            lane_x: [center_x - lane_offset, center_x, center_x + lane_offset],
            rabbit_home: Vec2::new(center_x, sizes.rabbit.y),
            door_top_y: screen.y + sizes.door.y / 2.0,
            door_bottom_y: -(sizes.wall.y - sizes.door.y / 2.0),
            wall_top_y: screen.y + sizes.wall.y / 2.0,
            wall_bottom_y: -sizes.wall.y / 2.0,
            enemy_top_y: screen.y + sizes.wall.y / 2.0,
            enemy_bottom_y: -sizes.wall.y / 2.0,
        }
    }

    pub fn lane_x(&self, lane: Lane) -> f32 {
        self.lane_x[lane.index()]
    }

    pub fn center_x(&self) -> f32 {
        self.screen.x / 2.0
    }
}
