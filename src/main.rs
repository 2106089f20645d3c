//! Inside The Hat headless runner
//!
//! Loads settings and the level table, then plays the configured number of
//! 60 Hz frames with a seeded bot tapping lanes. Useful for soak-testing the
//! simulation and for checking a level table end to end.
//!
//! Usage: `inside-the-hat [settings.json]`

use std::path::PathBuf;
use std::process::ExitCode;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use inside_the_hat::Settings;
use inside_the_hat::audio::AudioManager;
use inside_the_hat::persistence::JsonFileStore;
use inside_the_hat::platform::{AdService, Services};
use inside_the_hat::sim::{GamePhase, GameState, Lane, PauseReason, TickInput, tick};

const FRAME: f64 = 1.0 / 60.0;

/// Pretends every other advert loads and closes after two seconds
#[derive(Debug, Default)]
struct HeadlessAds {
    loaded: bool,
    shown: u32,
    preloads: u32,
}

impl AdService for HeadlessAds {
    fn preload(&mut self) {
        self.preloads += 1;
        self.loaded = self.preloads % 2 == 0;
    }

    fn is_ready(&self) -> bool {
        self.loaded
    }

    fn present(&mut self) {
        self.loaded = false;
        self.shown += 1;
    }
}

/// Taps a random lane now and then, and the highlight when the tutorial asks
struct Bot {
    rng: Pcg32,
}

impl Bot {
    fn next_tap(&mut self, state: &GameState) -> Option<glam::Vec2> {
        let screen = state.layout.screen;
        if state.phase == GamePhase::Paused(PauseReason::Tutorial) {
            return state
                .tutorial
                .overlay
                .as_ref()
                .and_then(|o| o.highlight)
                .map(|r| r.center());
        }
        if !state.door_outcome.is_open() || !self.rng.random_bool(0.02) {
            return None;
        }
        let lane = Lane::ALL[self.rng.random_range(0..Lane::ALL.len())];
        let x = screen.x * (lane.index() as f32 + 0.5) / 3.0;
        Some(glam::Vec2::new(x, screen.y / 2.0))
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(&PathBuf::from(path)),
        None => Settings::default(),
    };
    if let Err(err) = settings.tuning.validate() {
        log::error!("Invalid tuning: {err}");
        return ExitCode::FAILURE;
    }
    let level = match settings.level() {
        Ok(level) => level,
        Err(err) => {
            log::error!("Failed to load level table: {err}");
            return ExitCode::FAILURE;
        }
    };

    let seed = settings.seed.unwrap_or_else(rand::random::<u64>);
    log::info!("Inside The Hat (headless) starting, seed {seed}");

    let mut audio = AudioManager::load(&settings.audio_dir);
    let mut ads = HeadlessAds::default();
    let mut store = JsonFileStore::open(&settings.save_path);
    let mut bot = Bot {
        rng: Pcg32::seed_from_u64(seed ^ 0x5eed),
    };

    let mut state = {
        let mut services = Services::new(&mut audio, &mut ads, &mut store);
        GameState::start(
            level,
            settings.tuning.clone(),
            seed,
            settings.sound_on,
            &mut services,
        )
    };

    let mut games = 1u32;
    let mut advert_frames = 0u32;
    for frame in 0..settings.frames {
        let now = f64::from(frame) * FRAME;
        let tap = match state.phase {
            GamePhase::GameOver => {
                games += 1;
                state.reset_label.map(|r| r.center())
            }
            _ => bot.next_tap(&state),
        };

        {
            let mut services = Services::new(&mut audio, &mut ads, &mut store);
            tick(&mut state, &TickInput { now, tap }, &mut services);
        }

        if state.phase == GamePhase::Paused(PauseReason::Advert) {
            advert_frames += 1;
            if advert_frames >= 120 {
                advert_frames = 0;
                state.on_advert_dismissed(&mut ads);
            }
        }
    }

    log::info!(
        "Done after {} frames: {} game(s), wave {}, score {}, life {}, best {}, adverts {}",
        settings.frames,
        games,
        state.wave_number,
        state.score,
        state.life_points,
        state.best_score(),
        ads.shown
    );
    ExitCode::SUCCESS
}
