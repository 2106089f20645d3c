//! Per-frame simulation tick
//!
//! Core game loop. Within one tick the order is fixed: tap handling,
//! collision detection, wave resolution, parallax scroll, then action
//! advancement with the emitted events applied in emission order.

use glam::Vec2;

use super::state::{GamePhase, GameState, SimEvent};
use super::input::handle_tap;
use super::{collision, tutorial, wave};
use crate::platform::Services;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Host clock (seconds)
    pub now: f64,
    /// Tap in screen coordinates
    pub tap: Option<Vec2>,
}

/// Advance the game by the time elapsed since the previous tick
pub fn tick(state: &mut GameState, input: &TickInput, services: &mut Services<'_>) {
    if let Some(p) = input.tap {
        handle_tap(state, p, services);
    }

    // The clock keeps running while paused so resuming doesn't jump
    let dt = state.clock.delta(input.now);
    if !state.phase.is_running() {
        return;
    }

    collision::run(state, services);
    if state.wave_reset_pending && state.phase.is_running() {
        wave::resolve_wave(state, services);
    }
    if !state.phase.is_running() {
        return;
    }

    state.background.scroll(dt, 0.0);
    state.trees.scroll(dt, 0.0);

    for event in state.advance_actions(dt) {
        if state.phase == GamePhase::GameOver {
            break;
        }
        apply_event(state, event, services);
    }
}

fn apply_event(state: &mut GameState, event: SimEvent, services: &mut Services<'_>) {
    match event {
        SimEvent::DoorCycleCompleted(lane) => {
            state.doors.get_mut(lane).rearm();
            state.wave_reset_pending = true;
        }
        SimEvent::EnemyCycleCompleted => wave::resolve_enemy_cycle(state, services),
        SimEvent::SmashFinished => state.resume_jumping(),
        SimEvent::Tutorial(cue) => tutorial::on_cue(state, cue, services),
    }
}
