//! Tap routing
//!
//! A tap first hits the named regions (reset label, sound toggle, tutorial
//! highlight) and otherwise selects the lane under it by screen third. While
//! the tutorial is paused on a highlight, the highlight beats the toggle.

use glam::Vec2;

use super::door::Lane;
use super::state::{GamePhase, GameState, PauseReason};
use super::tutorial;
use crate::platform::Services;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapTarget {
    ResetLabel,
    SoundToggle,
    TutorialHighlight,
    Lane(Lane),
    /// Outside the screen
    Nothing,
}

/// Lane whose screen third contains `x`
pub fn lane_at(x: f32, screen_width: f32) -> Lane {
    let third = screen_width / 3.0;
    if x < third {
        Lane::Left
    } else if x < third * 2.0 {
        Lane::Center
    } else {
        Lane::Right
    }
}

pub fn resolve_tap(state: &GameState, p: Vec2) -> TapTarget {
    let screen = state.layout.screen;
    if !(0.0..=screen.x).contains(&p.x) || !(0.0..=screen.y).contains(&p.y) {
        return TapTarget::Nothing;
    }
    if state.reset_label.is_some_and(|r| r.contains(p)) {
        return TapTarget::ResetLabel;
    }
    // A tutorial pause waits on its highlight, which may cover the toggle
    let waiting = state.phase == GamePhase::Paused(PauseReason::Tutorial);
    if waiting && state.tutorial.highlight_contains(p) {
        return TapTarget::TutorialHighlight;
    }
    if state.sound_toggle.contains(p) {
        return TapTarget::SoundToggle;
    }
    if state.tutorial.highlight_contains(p) {
        return TapTarget::TutorialHighlight;
    }
    TapTarget::Lane(lane_at(p.x, screen.x))
}

pub fn handle_tap(state: &mut GameState, p: Vec2, services: &mut Services<'_>) {
    let target = resolve_tap(state, p);
    match target {
        TapTarget::ResetLabel => state.restart(services),
        TapTarget::SoundToggle => state.toggle_sound(services.audio),
        TapTarget::TutorialHighlight => {
            if state.phase == GamePhase::Paused(PauseReason::Tutorial) {
                tutorial::on_tap(state);
            }
        }
        TapTarget::Lane(lane) => {
            if state.phase.is_running()
                && !state.is_tutorial_active()
                && state.door_outcome.is_open()
            {
                state.move_rabbit(lane);
            } else {
                log::debug!("Tap on {lane} ignored ({:?})", state.phase);
            }
        }
        TapTarget::Nothing => log::debug!("Tap outside the screen at {p}"),
    }
}
