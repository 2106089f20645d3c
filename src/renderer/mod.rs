//! Render snapshot
//!
//! The simulation never draws. Each frame the host asks for a snapshot: a
//! flat list of sprites sorted by z-order, with texture names derived from
//! logical state, plus HUD text and the life bar.

use glam::Vec2;
use serde::Serialize;

use crate::sim::body::{Body, Clip};
use crate::sim::door::{Correctness, Door};
use crate::sim::enemy::EnemyType;
use crate::sim::geometry::Rect;
use crate::sim::state::{GamePhase, GameState};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawItem {
    pub texture: String,
    pub pos: Vec2,
    pub size: Vec2,
    pub anchor: Vec2,
    pub z: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextItem {
    pub text: String,
    pub pos: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub sprites: Vec<DrawItem>,
    pub texts: Vec<TextItem>,
    pub life_bar: Rect,
    pub life_fill: Rect,
}

pub fn door_texture(door: &Door) -> &'static str {
    match door.correctness {
        Correctness::Wrong => "wrong_door",
        Correctness::Correct => "correct_door",
    }
}

pub fn enemy_texture(kind: EnemyType) -> &'static str {
    match kind {
        EnemyType::LeftToRight => "enemyLeft",
        EnemyType::RightToLeft => "enemyRight",
    }
}

/// Rabbit frames are 1-based in the atlas
pub fn rabbit_texture(body: &Body) -> String {
    match body.sprite.clip {
        Clip::Still => "rabbit".to_string(),
        Clip::Jump => format!("rabbitJump{}", body.sprite.frame + 1),
        Clip::Smash => format!("rabbitSmash{}", body.sprite.frame + 1),
    }
}

fn item(body: &Body, texture: impl Into<String>) -> DrawItem {
    DrawItem {
        texture: texture.into(),
        pos: body.pos,
        size: body.size,
        anchor: body.anchor,
        z: body.z,
    }
}

pub fn snapshot(state: &GameState) -> Snapshot {
    let mut sprites = Vec::with_capacity(11);
    for layer in state.background.layers.iter().chain(&state.trees.layers) {
        sprites.push(item(layer, layer.name.clone()));
    }
    sprites.push(item(&state.wall, "wall"));
    sprites.push(item(&state.enemy.rail, "rail"));
    sprites.extend(
        state
            .doors
            .iter()
            .filter(|door| door.body.visible)
            .map(|door| item(&door.body, door_texture(door))),
    );
    sprites.push(item(&state.enemy.puppet, enemy_texture(state.enemy.kind)));
    sprites.push(item(&state.rabbit, rabbit_texture(&state.rabbit)));
    // Stable: equal z keeps insertion order
    sprites.sort_by_key(|s| s.z);

    let screen = state.layout.screen;
    let mut texts = vec![
        TextItem {
            text: format!("Score: {}", state.score),
            pos: Vec2::new(20.0, screen.y - 40.0),
        },
        TextItem {
            text: format!("Best: {}", state.records.best_score),
            pos: Vec2::new(screen.x - 120.0, screen.y - 40.0),
        },
    ];
    if let Some(overlay) = &state.tutorial.overlay {
        texts.push(TextItem {
            text: overlay.caption.to_string(),
            pos: overlay.hand.unwrap_or(screen / 2.0),
        });
    }
    if state.phase == GamePhase::GameOver {
        texts.push(TextItem {
            text: "Game Over".to_string(),
            pos: screen / 2.0,
        });
    }
    if let Some(label) = state.reset_label {
        texts.push(TextItem {
            text: "Reset Game".to_string(),
            pos: label.center(),
        });
    }

    Snapshot {
        sprites,
        texts,
        life_bar: state.life_bar.frame,
        life_fill: state
            .life_bar
            .fill(state.life_points, state.tuning.max_life_points),
    }
}
