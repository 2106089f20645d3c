//! Wave and life bookkeeping
//!
//! A wave resolves once a door finishes its pass: a hit costs a life point,
//! a clean pass scores. Enemy hits resolve separately, at the end of the
//! enemy's own vertical cycle.

use super::state::{DoorOutcome, GamePhase, GameState};
use crate::audio::Track;
use crate::platform::Services;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeLoss {
    Survived,
    GameOver,
}

/// Settle the finished wave and load the next one
pub fn resolve_wave(state: &mut GameState, services: &mut Services<'_>) {
    if state.door_outcome.is_hit() {
        lose_life(state, services);
    } else {
        state.score = state.score.saturating_add(state.tuning.score_per_wave);
    }

    state.door_outcome = DoorOutcome::Open;
    state.wave_reset_pending = false;
    state.wave_number = state.level.next_wave(state.wave_number);
    let record = state.level.wave(state.wave_number);
    state.doors.assign(record);
    log::info!(
        "Wave {} (score {}, life {})",
        state.wave_number,
        state.score,
        state.life_points
    );
}

/// End of the enemy's descent: settle a latched hit and re-roll the enemy
pub fn resolve_enemy_cycle(state: &mut GameState, services: &mut Services<'_>) {
    if state.enemy_hit && lose_life(state, services) == LifeLoss::Survived {
        state.present_advert(services.ads);
    }
    state.enemy_hit = false;

    let kind = state.roll_enemy_type();
    state.enemy.respawn(kind, &state.layout, &state.tuning);
    log::debug!("Enemy respawned as {kind:?}");
}

/// Take one life point, ending the game when none are left
pub fn lose_life(state: &mut GameState, services: &mut Services<'_>) -> LifeLoss {
    state.life_points = state.life_points.saturating_sub(1);
    log::debug!("Life lost, {} left", state.life_points);
    if state.life_points == 0 {
        game_over(state, services);
        LifeLoss::GameOver
    } else {
        LifeLoss::Survived
    }
}

/// Terminal state: runs once per session
pub fn game_over(state: &mut GameState, services: &mut Services<'_>) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    state.phase = GamePhase::GameOver;
    services.audio.stop(Track::BackgroundMusic);
    state.records.submit_score(state.score, services.store);
    state.reset_label = Some(state.game_over_label());
    log::info!(
        "Game over on wave {} with score {} (best {})",
        state.wave_number,
        state.score,
        state.records.best_score
    );
    state.present_advert(services.ads);
}
