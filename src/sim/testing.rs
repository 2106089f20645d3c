//! Recording fakes and fixtures shared by the simulation tests

use glam::Vec2;

use super::level::LevelConfig;
use super::state::GameState;
use super::tick::{TickInput, tick};
use crate::Tuning;
use crate::audio::Track;
use crate::persistence::MemoryStore;
use crate::platform::{AdService, AudioService, KeyValueStore, Services};
use crate::records::TUTORIAL_COMPLETED_KEY;

pub const FRAME: f64 = 1.0 / 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCall {
    Loop(Track),
    Once(Track),
    Stop(Track),
    Muted(bool),
}

#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub calls: Vec<AudioCall>,
}

impl RecordingAudio {
    pub fn count(&self, call: AudioCall) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }
}

impl AudioService for RecordingAudio {
    fn play_loop(&mut self, track: Track) {
        self.calls.push(AudioCall::Loop(track));
    }

    fn play_once(&mut self, track: Track) {
        self.calls.push(AudioCall::Once(track));
    }

    fn stop(&mut self, track: Track) {
        self.calls.push(AudioCall::Stop(track));
    }

    fn set_muted(&mut self, muted: bool) {
        self.calls.push(AudioCall::Muted(muted));
    }
}

/// Ad network whose readiness is set by the test; presenting consumes it
#[derive(Debug, Default)]
pub struct FakeAds {
    pub ready: bool,
    pub preloads: u32,
    pub presented: u32,
}

impl AdService for FakeAds {
    fn preload(&mut self) {
        self.preloads += 1;
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn present(&mut self) {
        self.presented += 1;
        self.ready = false;
    }
}

/// Services plus a 60 Hz wall clock
#[derive(Debug, Default)]
pub struct Fixture {
    pub audio: RecordingAudio,
    pub ads: FakeAds,
    pub store: MemoryStore,
    pub now: f64,
}

impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store already records a completed tutorial
    pub fn tutorial_done() -> Self {
        let mut fx = Self::new();
        fx.store.set_bool(TUTORIAL_COMPLETED_KEY, true);
        fx
    }

    pub fn services(&mut self) -> Services<'_> {
        Services::new(&mut self.audio, &mut self.ads, &mut self.store)
    }

    pub fn start(&mut self, level: LevelConfig, seed: u64) -> GameState {
        GameState::start(level, Tuning::default(), seed, true, &mut self.services())
    }

    /// One tick, optionally with a tap
    pub fn step(&mut self, state: &mut GameState, tap: Option<Vec2>) {
        let input = TickInput { now: self.now, tap };
        tick(state, &input, &mut self.services());
        self.now += FRAME;
    }

    pub fn run(&mut self, state: &mut GameState, seconds: f64) {
        let frames = (seconds / FRAME).ceil() as usize;
        for _ in 0..frames {
            self.step(state, None);
        }
    }

    /// Tick until `done` holds; false if `max_seconds` elapsed first
    pub fn run_until(
        &mut self,
        state: &mut GameState,
        max_seconds: f64,
        mut done: impl FnMut(&GameState) -> bool,
    ) -> bool {
        let frames = (max_seconds / FRAME).ceil() as usize;
        for _ in 0..frames {
            if done(state) {
                return true;
            }
            self.step(state, None);
        }
        done(state)
    }
}

/// maxWaves = 3; wave 2 has a wrong left door, every other door is correct
pub fn three_wave_level() -> LevelConfig {
    LevelConfig::from_json(
        r#"{
            "numWaves": 3,
            "wave - 1": { "leftDoor": "correct", "centerDoor": "correct", "rightDoor": "correct" },
            "wave - 2": { "leftDoor": "wrong", "centerDoor": "correct", "rightDoor": "correct" },
            "wave - 3": { "leftDoor": "correct", "centerDoor": "correct", "rightDoor": "correct" }
        }"#,
    )
    .unwrap()
}

/// Single wave whose centre door (the rabbit's starting lane) is wrong
pub fn wrong_center_level() -> LevelConfig {
    LevelConfig::from_json(
        r#"{
            "numWaves": 1,
            "wave - 1": { "leftDoor": "correct", "centerDoor": "wrong", "rightDoor": "correct" }
        }"#,
    )
    .unwrap()
}

/// Freeze the enemy above the screen so it never reaches the rabbit
pub fn park_enemy(state: &mut GameState) {
    state.enemy.rail.cancel(super::enemy::ENEMY_CYCLE);
}

/// Freeze every door above the screen
pub fn park_doors(state: &mut GameState) {
    for door in state.doors.iter_mut() {
        door.body.cancel(super::door::DOOR_CYCLE);
    }
}

/// Screen point inside the given lane's third, clear of the sound toggle
pub fn lane_tap(state: &GameState, lane: super::door::Lane) -> Vec2 {
    let third = state.layout.screen.x / 3.0;
    Vec2::new(third * (lane.index() as f32 + 0.5), state.layout.screen.y / 2.0)
}
