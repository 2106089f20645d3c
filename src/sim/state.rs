//! Game state and core simulation types
//!
//! `GameState` is the whole simulation context. Collision, wave, tutorial
//! and input logic all take it by `&mut` and talk to the outside world only
//! through `Services`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::action::{Action, ActionKey};
use super::body::{Body, Clip};
use super::door::{Doors, Lane};
use super::enemy::{Enemy, EnemyType};
use super::geometry::Rect;
use super::layout::Layout;
use super::level::LevelConfig;
use super::parallax::{FrameClock, ParallaxBand};
use super::tutorial::{self, Tutorial, TutorialCue};
use crate::audio::Track;
use crate::platform::{AdService, AudioService, Services};
use crate::{Records, Tuning};

/// Rabbit's looping jump clip
pub const JUMPING: ActionKey = "jumping";
/// Rabbit's one-shot smash clip
pub const SMASHING: ActionKey = "smashing";
/// Rabbit's lateral move towards a lane
pub const RABBIT_MOVE: ActionKey = "rabbit_move";
pub const WALL_CYCLE: ActionKey = "wall_cycle";

/// Completion signals queued by actions and applied by the tick
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    /// A door finished its pass and is parked at the top again
    DoorCycleCompleted(Lane),
    /// The enemy rail reached the bottom of its descent
    EnemyCycleCompleted,
    /// The rabbit's smash clip ended
    SmashFinished,
    Tutorial(TutorialCue),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PauseReason {
    /// Waiting for the player to tap the highlighted region
    Tutorial,
    /// Interstitial on screen until dismissed
    Advert,
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Running,
    Paused(PauseReason),
    /// Terminal until the reset label is tapped
    GameOver,
}

impl GamePhase {
    pub fn is_running(self) -> bool {
        self == GamePhase::Running
    }
}

/// How the rabbit met this wave's doors
///
/// Anything but `Open` means the wave's door outcome is latched and lane
/// input is disabled until the wave resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoorOutcome {
    Open,
    Passed(Lane),
    Hit(Lane),
}

impl DoorOutcome {
    pub fn is_open(self) -> bool {
        self == DoorOutcome::Open
    }

    pub fn is_hit(self) -> bool {
        matches!(self, DoorOutcome::Hit(_))
    }
}

/// Red bar with a green fill proportional to remaining life
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LifeBar {
    pub frame: Rect,
}

impl LifeBar {
    pub const HEIGHT: f32 = 20.0;

    /// Half the screen wide, under the score in the top-left corner
    pub fn new(screen: Vec2) -> Self {
        let size = Vec2::new(screen.x / 2.0, Self::HEIGHT);
        let center = Vec2::new(screen.x / 4.0 + 20.0, screen.y - 30.0);
        Self {
            frame: Rect::from_center(center, size),
        }
    }

    /// Green part, growing from the left edge
    pub fn fill(&self, life_points: u8, max_life_points: u8) -> Rect {
        let ratio = if max_life_points == 0 {
            0.0
        } else {
            (f32::from(life_points) / f32::from(max_life_points)).clamp(0.0, 1.0)
        };
        let max_x = self.frame.min.x + self.frame.width() * ratio;
        Rect::new(self.frame.min, Vec2::new(max_x, self.frame.max.y))
    }
}

#[derive(Debug)]
pub struct GameState {
    pub tuning: Tuning,
    pub layout: Layout,
    pub level: LevelConfig,
    pub records: Records,
    /// Seed this session was built from
    pub seed: u64,
    rng: Pcg32,

    pub phase: GamePhase,
    pub score: u32,
    pub life_points: u8,
    /// 1-based, wraps after `level.max_waves()`
    pub wave_number: usize,
    pub door_outcome: DoorOutcome,
    /// Latched by any door finishing its pass, consumed by wave resolution
    pub wave_reset_pending: bool,
    /// Latched by an enemy contact, consumed at the enemy cycle boundary
    pub enemy_hit: bool,
    pub sound_on: bool,

    pub rabbit: Body,
    pub wall: Body,
    pub doors: Doors,
    pub enemy: Enemy,
    pub background: ParallaxBand,
    pub trees: ParallaxBand,
    pub life_bar: LifeBar,
    pub tutorial: Tutorial,
    /// Invisible body carrying scene-level timers
    pub scene: Body,

    pub clock: FrameClock,
    /// Tappable "Reset Game" label, present only after game over
    pub reset_label: Option<Rect>,
    pub sound_toggle: Rect,
}

impl GameState {
    /// Build a fresh scene with every cycle scheduled. No services are touched.
    pub fn new(level: LevelConfig, tuning: Tuning, records: Records, seed: u64) -> Self {
        let layout = Layout::new(&tuning);
        let mut rng = Pcg32::seed_from_u64(seed);
        let sizes = tuning.sizes.clone();
        let screen = layout.screen;

        let mut rabbit = Body::new("rabbit", sizes.rabbit)
            .at(layout.rabbit_home)
            .with_z(2);
        rabbit.run_keyed(JUMPING, jump_loop(&tuning));

        let wall_top = Vec2::new(layout.center_x(), layout.wall_top_y);
        let mut wall = Body::new("wall", sizes.wall).at(wall_top).with_z(0);
        wall.run_keyed(
            WALL_CYCLE,
            Action::forever(Action::sequence(vec![
                Action::move_to_y(wall_top, layout.wall_bottom_y, tuning.running_speed),
                Action::place_y(layout.wall_top_y),
                Action::wait(tuning.cycle_delay),
            ])),
        );

        let mut doors = Doors::new(level.wave(1), &layout, &tuning);
        doors.start_cycles(&layout, &tuning);

        let mut enemy = Enemy::new(EnemyType::random(&mut rng), &layout, &tuning);
        enemy.start(&layout, &tuning);

        let background = ParallaxBand::new(
            "background",
            Vec2::ZERO,
            sizes.background,
            Vec2::ZERO,
            -1,
            tuning.background_speed,
        );
        let trees = ParallaxBand::new(
            "trees",
            Vec2::ZERO,
            sizes.trees,
            Vec2::ZERO,
            3,
            tuning.trees_speed,
        );

        let toggle_size = sizes.rabbit.x;
        let sound_toggle = Rect::new(
            Vec2::new(screen.x - toggle_size, 0.0),
            Vec2::new(screen.x, toggle_size),
        );

        let mut state = Self {
            life_points: tuning.max_life_points,
            life_bar: LifeBar::new(screen),
            tutorial: Tutorial::new(records.tutorial_completed),
            tuning,
            layout,
            level,
            records,
            seed,
            rng,
            phase: GamePhase::Running,
            score: 0,
            wave_number: 1,
            door_outcome: DoorOutcome::Open,
            wave_reset_pending: false,
            enemy_hit: false,
            sound_on: true,
            rabbit,
            wall,
            doors,
            enemy,
            background,
            trees,
            scene: Body::new("scene", Vec2::ZERO),
            clock: FrameClock::new(),
            reset_label: None,
            sound_toggle,
        };
        tutorial::begin(&mut state);
        log::info!(
            "Scene ready: {} waves, enemy {:?}, seed {}",
            state.level.max_waves(),
            state.enemy.kind,
            seed
        );
        state
    }

    pub fn with_sound(mut self, sound_on: bool) -> Self {
        self.sound_on = sound_on;
        self
    }

    /// Load records, build the scene and start music and ad preloading
    pub fn start(
        level: LevelConfig,
        tuning: Tuning,
        seed: u64,
        sound_on: bool,
        services: &mut Services<'_>,
    ) -> Self {
        let records = Records::load(&*services.store);
        let mut state = Self::new(level, tuning, records, seed).with_sound(sound_on);
        state.begin(services);
        state
    }

    fn begin(&mut self, services: &mut Services<'_>) {
        services.audio.set_muted(!self.sound_on);
        if self.sound_on {
            services.audio.play_loop(Track::BackgroundMusic);
        }
        services.ads.preload();
    }

    /// Tear the scene down and start over: score 0, wave 1, full life
    pub fn restart(&mut self, services: &mut Services<'_>) {
        let seed = self.rng.random::<u64>();
        let records = Records::load(&*services.store);
        let fresh = Self::new(self.level.clone(), self.tuning.clone(), records, seed)
            .with_sound(self.sound_on);
        *self = fresh;
        self.begin(services);
        log::info!("Game restarted (seed {seed})");
    }

    pub fn is_tutorial_active(&self) -> bool {
        self.tutorial.is_active()
    }

    pub fn best_score(&self) -> u32 {
        self.records.best_score
    }

    pub fn roll_enemy_type(&mut self) -> EnemyType {
        EnemyType::random(&mut self.rng)
    }

    /// One-shot effect, skipped while sound is off
    pub fn play_effect(&self, audio: &mut dyn AudioService, track: Track) {
        if self.sound_on {
            audio.play_once(track);
        }
    }

    pub fn toggle_sound(&mut self, audio: &mut dyn AudioService) {
        self.sound_on = !self.sound_on;
        audio.set_muted(!self.sound_on);
        if !self.sound_on {
            audio.stop(Track::BackgroundMusic);
        } else if self.phase != GamePhase::GameOver {
            audio.play_loop(Track::BackgroundMusic);
        }
        log::info!("Sound {}", if self.sound_on { "on" } else { "off" });
    }

    /// Show an interstitial if one is loaded. Pauses a running simulation.
    pub fn present_advert(&mut self, ads: &mut dyn AdService) -> bool {
        if !ads.is_ready() {
            log::debug!("Advert not ready, skipping");
            return false;
        }
        if self.phase.is_running() {
            self.phase = GamePhase::Paused(PauseReason::Advert);
        }
        ads.present();
        true
    }

    /// Resume after an interstitial closes and queue the next one
    pub fn on_advert_dismissed(&mut self, ads: &mut dyn AdService) {
        if self.phase == GamePhase::Paused(PauseReason::Advert) {
            self.phase = GamePhase::Running;
        }
        ads.preload();
    }

    /// Constant-speed move from the rabbit's current x to a lane
    pub fn rabbit_move_action(&self, lane: Lane) -> Action {
        Action::move_to_x(
            self.rabbit.pos,
            self.layout.lane_x(lane),
            self.tuning.rabbit_speed,
        )
    }

    /// Replace any move in progress with one towards `lane`
    pub fn move_rabbit(&mut self, lane: Lane) {
        let action = self.rabbit_move_action(lane);
        self.rabbit.run_keyed(RABBIT_MOVE, action);
    }

    /// Interrupt the jump loop with a single smash clip
    pub fn smash_rabbit(&mut self) {
        self.rabbit.cancel(JUMPING);
        self.rabbit.run_keyed(
            SMASHING,
            Action::sequence(vec![
                Action::Animate {
                    clip: Clip::Smash,
                    frames: self.tuning.smash_frames,
                    frame_time: self.tuning.clip_frame_time,
                },
                Action::emit(SimEvent::SmashFinished),
            ]),
        );
    }

    pub fn resume_jumping(&mut self) {
        self.rabbit.run_keyed(JUMPING, jump_loop(&self.tuning));
    }

    /// Advance every body's actions and collect what they emitted
    pub fn advance_actions(&mut self, dt: f32) -> Vec<SimEvent> {
        let mut events = Vec::new();
        self.scene.update(dt, &mut events);
        self.rabbit.update(dt, &mut events);
        self.wall.update(dt, &mut events);
        for door in self.doors.iter_mut() {
            door.body.update(dt, &mut events);
        }
        self.enemy.update(dt, &mut events);
        events
    }

    pub fn game_over_label(&self) -> Rect {
        let center = self.layout.screen / 2.0 - Vec2::new(0.0, 60.0);
        Rect::from_center(center, Vec2::new(160.0, 40.0))
    }
}

fn jump_loop(tuning: &Tuning) -> Action {
    Action::forever(Action::Animate {
        clip: Clip::Jump,
        frames: tuning.jump_frames,
        frame_time: tuning.clip_frame_time,
    })
}
