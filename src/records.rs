//! Persistent player records
//!
//! Two values survive between sessions: the best score and whether the
//! tutorial has been completed. Both live in the platform key-value store.

use serde::{Deserialize, Serialize};

use crate::platform::KeyValueStore;

pub const BEST_SCORE_KEY: &str = "user_default_best_score";
pub const TUTORIAL_COMPLETED_KEY: &str = "user_default_tutorial_completed";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Records {
    pub best_score: u32,
    pub tutorial_completed: bool,
}

impl Records {
    /// Read both records; absent keys give 0 / false
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let raw = store.get_int(BEST_SCORE_KEY);
        let best_score = u32::try_from(raw.max(0)).unwrap_or(u32::MAX);
        let records = Self {
            best_score,
            tutorial_completed: store.get_bool(TUTORIAL_COMPLETED_KEY),
        };
        log::debug!("Loaded records {records:?}");
        records
    }

    /// Check if a score beats the stored best
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.best_score
    }

    /// Store `score` if it is a new best. Returns whether it was.
    pub fn submit_score(&mut self, score: u32, store: &mut dyn KeyValueStore) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best_score = score;
        store.set_int(BEST_SCORE_KEY, i64::from(score));
        log::info!("New best score: {score}");
        true
    }

    pub fn mark_tutorial_completed(&mut self, store: &mut dyn KeyValueStore) {
        self.tutorial_completed = true;
        store.set_bool(TUTORIAL_COMPLETED_KEY, true);
        log::info!("Tutorial completed");
    }
}
