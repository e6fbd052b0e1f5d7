use log::{info, warn};

use crate::persistence::{HighScoreStore, StoreError};

/// Scores at the end of a game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalScore {
    pub score: u32,
    pub high_score: u32,
    /// The game beat the previous high score
    pub new_record: bool,
    /// Message of a failed high score save; gameplay is unaffected
    pub save_error: Option<String>,
}

/// Current score plus the session's cached high score
pub struct ScoreKeeper {
    score: u32,
    high_score: u32,
    store: Box<dyn HighScoreStore>,
}

impl ScoreKeeper {
    /// Keeper backed by `store`. The cached high score starts at 0 until
    /// [`ScoreKeeper::load`] is called.
    pub fn new(store: Box<dyn HighScoreStore>) -> Self {
        Self {
            score: 0,
            high_score: 0,
            store,
        }
    }

    /// Read the stored high score into the cache. On failure the cache keeps
    /// its current value and the error is returned.
    pub fn load(&mut self) -> Result<u32, StoreError> {
        let stored = self.store.load_high_score()?;
        self.high_score = self.high_score.max(stored);
        Ok(self.high_score)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn reset(&mut self) {
        self.score = 0;
    }

    pub fn increment(&mut self) {
        self.score = self.score.saturating_add(1);
    }

    /// Settle the game: raise the high score and issue one save when the
    /// current score beats it
    pub fn finalize(&mut self) -> FinalScore {
        if self.score <= self.high_score {
            return FinalScore {
                score: self.score,
                high_score: self.high_score,
                new_record: false,
                save_error: None,
            };
        }

        info!(
            "New high score {} (previous {})",
            self.score, self.high_score
        );
        self.high_score = self.score;

        let save_error = match self.store.save_high_score(self.high_score) {
            Ok(()) => None,
            Err(err) => {
                warn!("Failed to save high score: {err}");
                Some(err.to_string())
            }
        };

        FinalScore {
            score: self.score,
            high_score: self.high_score,
            new_record: true,
            save_error,
        }
    }
}
