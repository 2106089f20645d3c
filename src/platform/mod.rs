//! Platform abstraction layer
//!
//! The simulation talks to the outside world only through these traits:
//! - Audio playback (looping music, one-shot effects, mute)
//! - Interstitial adverts (preload, readiness, presentation)
//! - Key-value storage for records

use crate::audio::Track;

pub trait AudioService {
    /// Start a track looping until stopped
    fn play_loop(&mut self, track: Track);
    fn play_once(&mut self, track: Track);
    fn stop(&mut self, track: Track);
    fn set_muted(&mut self, muted: bool);
}

/// Full-screen advert provider
///
/// `present` is only called when `is_ready` returned true. Dismissal is
/// reported back through `GameState::on_advert_dismissed`.
pub trait AdService {
    fn preload(&mut self);
    fn is_ready(&self) -> bool;
    fn present(&mut self);
}

/// Persistent typed storage; missing keys read as 0 / false
pub trait KeyValueStore {
    fn get_int(&self, key: &str) -> i64;
    fn set_int(&mut self, key: &str, value: i64);
    fn get_bool(&self, key: &str) -> bool;
    fn set_bool(&mut self, key: &str, value: bool);
}

/// Borrowed bundle of services handed to every tick
pub struct Services<'a> {
    pub audio: &'a mut dyn AudioService,
    pub ads: &'a mut dyn AdService,
    pub store: &'a mut dyn KeyValueStore,
}

impl<'a> Services<'a> {
    pub fn new(
        audio: &'a mut dyn AudioService,
        ads: &'a mut dyn AdService,
        store: &'a mut dyn KeyValueStore,
    ) -> Self {
        Self { audio, ads, store }
    }
}

/// Ad provider that never has anything to show
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAds;

impl AdService for NoAds {
    fn preload(&mut self) {}

    fn is_ready(&self) -> bool {
        false
    }

    fn present(&mut self) {}
}
