//! Best-score tracking for the asteroid dodger
//!
//! Persisted as a plain decimal integer so the value stays readable by the
//! original web page under the same LocalStorage key.

use crate::error::Result;
use crate::platform::KeyValueStore;

/// Best score across sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "asteroidDodgerHighScore";

    /// Create with an existing best
    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Check if a score would beat the current best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a finished session. Returns true if it set a new best.
    pub fn record(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        true
    }

    /// Load the best score; missing or unreadable values count as zero
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(raw)) => match parse_score(&raw) {
                Some(best) => {
                    log::info!("Loaded high score {}", best);
                    Self { best }
                }
                None => {
                    log::warn!("Ignoring unreadable high score {:?}", raw);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read high score: {}", e);
                Self::default()
            }
        }
    }

    /// Save the best score
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        store.set(Self::STORAGE_KEY, &self.best.to_string())?;
        log::info!("High score saved ({})", self.best);
        Ok(())
    }
}

/// Parse the stored value, accepting the leading-integer forms JS `parseInt` writes
fn parse_score(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    let digits: &str = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .map_or(trimmed, |end| &trimmed[..end]);
    digits.parse().ok()
}
