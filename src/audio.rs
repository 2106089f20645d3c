//! Audio tracks and channel bookkeeping
//!
//! The game uses three bundled sounds. `AudioManager` resolves them against
//! an asset directory once; a missing file disables that track (warned at
//! load time) instead of failing the session. Actual sample playback belongs
//! to the host backend, which mirrors the channel state kept here.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::platform::AudioService;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Track {
    /// Looping soundtrack, started with the session
    BackgroundMusic,
    /// Wrong door or enemy hit
    WrongDoor,
    /// Correct door passed
    CorrectDoor,
}

impl Track {
    pub const ALL: [Track; 3] = [Track::BackgroundMusic, Track::WrongDoor, Track::CorrectDoor];

    pub fn file_name(self) -> &'static str {
        match self {
            Track::BackgroundMusic => "background_music.mp3",
            Track::WrongDoor => "wrong_door.wav",
            Track::CorrectDoor => "correct_door.wav",
        }
    }
}

/// Playback state of one track
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Channel {
    pub source: Option<PathBuf>,
    pub looping: bool,
    pub plays: u32,
}

impl Channel {
    pub fn is_loaded(&self) -> bool {
        self.source.is_some()
    }
}

#[derive(Debug, Default)]
pub struct AudioManager {
    channels: HashMap<Track, Channel>,
    muted: bool,
}

impl AudioManager {
    /// Manager with every track unavailable
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve every track inside `dir`
    pub fn load(dir: &Path) -> Self {
        let mut manager = Self::new();
        for track in Track::ALL {
            let path = dir.join(track.file_name());
            if path.is_file() {
                log::debug!("Audio {:?} -> {}", track, path.display());
                manager.channel_mut(track).source = Some(path);
            } else {
                log::warn!("Missing audio asset {} - {:?} disabled", path.display(), track);
            }
        }
        manager
    }

    fn channel_mut(&mut self, track: Track) -> &mut Channel {
        self.channels.entry(track).or_default()
    }

    pub fn channel(&self, track: Track) -> Option<&Channel> {
        self.channels.get(&track)
    }

    pub fn is_looping(&self, track: Track) -> bool {
        self.channel(track).is_some_and(|c| c.looping)
    }

    pub fn play_count(&self, track: Track) -> u32 {
        self.channel(track).map_or(0, |c| c.plays)
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Loaded channel for `track`, or None (and a debug note) when disabled
    fn playable(&mut self, track: Track) -> Option<&mut Channel> {
        let channel = self.channel_mut(track);
        if channel.is_loaded() {
            Some(channel)
        } else {
            log::debug!("{track:?} unavailable, skipping");
            None
        }
    }
}

impl AudioService for AudioManager {
    fn play_loop(&mut self, track: Track) {
        if let Some(channel) = self.playable(track) {
            channel.looping = true;
            channel.plays += 1;
        }
    }

    fn play_once(&mut self, track: Track) {
        if let Some(channel) = self.playable(track) {
            channel.plays += 1;
        }
    }

    fn stop(&mut self, track: Track) {
        if let Some(channel) = self.channels.get_mut(&track) {
            channel.looping = false;
        }
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        log::debug!("Audio muted: {muted}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_assets_are_no_ops() {
        let dir = tempfile::tempdir().unwrap();
        let mut audio = AudioManager::load(dir.path());
        audio.play_loop(Track::BackgroundMusic);
        audio.play_once(Track::WrongDoor);
        assert!(!audio.is_looping(Track::BackgroundMusic));
        assert_eq!(audio.play_count(Track::WrongDoor), 0);
    }

    #[test]
    fn test_loaded_tracks_play() {
        let dir = tempfile::tempdir().unwrap();
        for track in Track::ALL {
            fs::write(dir.path().join(track.file_name()), b"riff").unwrap();
        }
        let mut audio = AudioManager::load(dir.path());
        audio.play_loop(Track::BackgroundMusic);
        audio.play_once(Track::CorrectDoor);
        audio.play_once(Track::CorrectDoor);
        assert!(audio.is_looping(Track::BackgroundMusic));
        assert_eq!(audio.play_count(Track::CorrectDoor), 2);

        audio.stop(Track::BackgroundMusic);
        assert!(!audio.is_looping(Track::BackgroundMusic));
    }

    #[test]
    fn test_mute_flag_toggles() {
        let mut audio = AudioManager::new();
        audio.set_muted(true);
        assert!(audio.is_muted());
        audio.set_muted(false);
        assert!(!audio.is_muted());
    }
}
