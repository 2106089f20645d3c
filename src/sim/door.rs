//! Door lanes
//!
//! Each lane owns one door body that descends from above the screen past the
//! player, snaps back to the top and waits before the next pass. Correctness
//! is logical state; the body name and texture are derived from it.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::action::{Action, ActionKey};
use super::body::Body;
use super::layout::Layout;
use super::level::WaveRecord;
use super::state::SimEvent;
use crate::Tuning;

/// Key of the repeating descent on every door
pub const DOOR_CYCLE: ActionKey = "door_cycle";

/// One of the three fixed horizontal door positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lane {
    Left,
    Center,
    Right,
}

impl Lane {
    pub const ALL: [Lane; 3] = [Lane::Left, Lane::Center, Lane::Right];

    pub fn index(self) -> usize {
        match self {
            Lane::Left => 0,
            Lane::Center => 1,
            Lane::Right => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Lane::Left => "left",
            Lane::Center => "center",
            Lane::Right => "right",
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Correctness {
    Wrong,
    Correct,
}

impl Correctness {
    pub fn as_str(self) -> &'static str {
        match self {
            Correctness::Wrong => "wrong",
            Correctness::Correct => "correct",
        }
    }
}

#[derive(Debug)]
pub struct Door {
    pub lane: Lane,
    pub correctness: Correctness,
    pub body: Body,
}

impl Door {
    /// Door parked above the screen in its lane; the cycle is not started yet
    pub fn new(lane: Lane, wave: WaveRecord, layout: &Layout, tuning: &Tuning) -> Self {
        let body = Body::new("", tuning.sizes.door)
            .at(Vec2::new(layout.lane_x(lane), layout.door_top_y))
            .with_z(1);
        let mut door = Self {
            lane,
            correctness: Correctness::Correct,
            body,
        };
        door.assign(wave);
        door
    }

    /// Take this lane's correctness from a wave record
    pub fn assign(&mut self, wave: WaveRecord) {
        self.correctness = if wave.is_wrong(self.lane) {
            Correctness::Wrong
        } else {
            Correctness::Correct
        };
        self.body.name = format!("{}_{}_door", self.correctness.as_str(), self.lane);
    }

    pub fn is_wrong(&self) -> bool {
        self.correctness == Correctness::Wrong
    }

    /// Start the endless descend / snap back / wait cycle
    pub fn start_cycle(&mut self, layout: &Layout, tuning: &Tuning) {
        let top = Vec2::new(self.body.pos.x, layout.door_top_y);
        let descent = Action::move_to_y(top, layout.door_bottom_y, tuning.running_speed);
        self.body.run_keyed(
            DOOR_CYCLE,
            Action::forever(Action::sequence(vec![
                descent,
                Action::place_y(layout.door_top_y),
                Action::emit(SimEvent::DoorCycleCompleted(self.lane)),
                Action::wait(tuning.cycle_delay),
            ])),
        );
    }

    /// Back at the top after a pass: visible again for the next wave
    pub fn rearm(&mut self) {
        self.body.visible = true;
    }
}

/// The three doors, indexed by lane
#[derive(Debug)]
pub struct Doors([Door; 3]);

impl Doors {
    pub fn new(wave: WaveRecord, layout: &Layout, tuning: &Tuning) -> Self {
        Self(Lane::ALL.map(|lane| Door::new(lane, wave, layout, tuning)))
    }

    pub fn get(&self, lane: Lane) -> &Door {
        &self.0[lane.index()]
    }

    pub fn get_mut(&mut self, lane: Lane) -> &mut Door {
        &mut self.0[lane.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Door> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Door> {
        self.0.iter_mut()
    }

    pub fn assign(&mut self, wave: WaveRecord) {
        for door in &mut self.0 {
            door.assign(wave);
        }
    }

    pub fn start_cycles(&mut self, layout: &Layout, tuning: &Tuning) {
        for door in &mut self.0 {
            door.start_cycle(layout, tuning);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wave(left: bool, center: bool, right: bool) -> WaveRecord {
        WaveRecord {
            left_wrong: left,
            center_wrong: center,
            right_wrong: right,
        }
    }

    #[test]
    fn test_assign_names_door() {
        let tuning = Tuning::default();
        let layout = Layout::new(&tuning);
        let mut doors = Doors::new(wave(true, false, false), &layout, &tuning);
        assert_eq!(doors.get(Lane::Left).body.name, "wrong_left_door");
        assert_eq!(doors.get(Lane::Center).body.name, "correct_center_door");
        assert!(doors.get(Lane::Left).is_wrong());

        doors.assign(wave(false, true, true));
        assert_eq!(doors.get(Lane::Left).body.name, "correct_left_door");
        assert_eq!(doors.get(Lane::Right).body.name, "wrong_right_door");
    }

    #[test]
    fn test_cycle_emits_and_returns_to_top() {
        let tuning = Tuning::default();
        let layout = Layout::new(&tuning);
        let mut doors = Doors::new(WaveRecord::default(), &layout, &tuning);
        doors.start_cycles(&layout, &tuning);

        let pass = (layout.door_top_y - layout.door_bottom_y) / tuning.running_speed;
        let mut events = Vec::new();
        let door = doors.get_mut(Lane::Center);
        door.body.update(pass / 2.0, &mut events);
        assert!(door.body.pos.y < layout.door_top_y);
        assert!(events.is_empty());

        door.body.update(pass / 2.0 + 0.01, &mut events);
        assert_eq!(events, vec![SimEvent::DoorCycleCompleted(Lane::Center)]);
        assert_eq!(door.body.pos.y, layout.door_top_y);
        assert!(door.body.actions.contains(DOOR_CYCLE));
    }
}
