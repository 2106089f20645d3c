//! Player vs hazard contacts
//!
//! Hazards are the three doors and the enemy puppet. A contact needs box
//! overlap and the hazard's bottom edge to have come down to the rabbit's
//! anchor height, so a hazard still visually above the rabbit never counts.

use super::body::Body;
use super::door::Lane;
use super::state::{DoorOutcome, GameState};
use crate::audio::Track;
use crate::platform::Services;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    WrongDoor(Lane),
    CorrectDoor(Lane),
    Enemy,
}

/// Overlap plus the leading-edge test
pub fn has_reached(hazard: &Body, player: &Body) -> bool {
    let frame = hazard.frame();
    hazard.visible && frame.intersects(&player.frame()) && frame.min.y <= player.pos.y
}

/// Contacts starting this tick, at most one door then the enemy
///
/// Doors stay live after a correct pass and are skipped only once a wrong
/// door has been hit this wave. When several doors are touched at once a
/// wrong one wins, otherwise the first in lane order. The enemy is reported
/// on the rising edge only.
pub fn detect(state: &GameState) -> Vec<Contact> {
    let mut contacts = Vec::new();

    if !state.door_outcome.is_hit() {
        let mut touched = state
            .doors
            .iter()
            .filter(|door| has_reached(&door.body, &state.rabbit));
        let first = touched.next();
        let door = if first.is_some_and(|d| d.is_wrong()) {
            first
        } else {
            touched.find(|d| d.is_wrong()).or(first)
        };
        if let Some(door) = door {
            contacts.push(if door.is_wrong() {
                Contact::WrongDoor(door.lane)
            } else {
                Contact::CorrectDoor(door.lane)
            });
        }
    }

    if !state.enemy_hit && has_reached(&state.enemy.puppet, &state.rabbit) {
        contacts.push(Contact::Enemy);
    }

    contacts
}

/// Apply one contact's latches and side effects
pub fn resolve(state: &mut GameState, contact: Contact, services: &mut Services<'_>) {
    log::debug!("Contact {contact:?} on wave {}", state.wave_number);
    match contact {
        Contact::WrongDoor(lane) => {
            state.door_outcome = DoorOutcome::Hit(lane);
            state.doors.get_mut(lane).body.visible = false;
            state.play_effect(services.audio, Track::WrongDoor);
            state.smash_rabbit();
            // A fatal hit gets its advert from game over instead
            if state.life_points > 1 {
                state.present_advert(services.ads);
            }
        }
        Contact::CorrectDoor(lane) => {
            state.door_outcome = DoorOutcome::Passed(lane);
            state.doors.get_mut(lane).body.visible = false;
            state.play_effect(services.audio, Track::CorrectDoor);
        }
        Contact::Enemy => {
            state.enemy_hit = true;
            state.play_effect(services.audio, Track::WrongDoor);
            state.smash_rabbit();
        }
    }
}

/// Detect and resolve every contact for this tick
pub fn run(state: &mut GameState, services: &mut Services<'_>) -> usize {
    let contacts = detect(state);
    for &contact in &contacts {
        resolve(state, contact, services);
    }
    contacts.len()
}
