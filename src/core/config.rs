//! Game configuration.
//!
//! - `ScoringPolicy`: score deltas for matches, mismatches, hints, shuffles
//! - `SetConfig`: deal sizes, refill behavior, seed, and scoring
//!
//! Magnitudes are tunable policy, not part of the rules. Penalties are stored
//! as non-negative amounts and subtracted from the score.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::DECK_SIZE;

/// Score deltas applied by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    /// Added when three selected cards form a Set.
    pub match_bonus: i64,
    /// Subtracted when three selected cards do not form a Set.
    pub mismatch_penalty: i64,
    /// Subtracted when a hint finds a card.
    pub hint_penalty: i64,
    /// Subtracted when shuffling away an available Set.
    pub shuffle_penalty: i64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            match_bonus: 3,
            mismatch_penalty: 1,
            hint_penalty: 1,
            shuffle_penalty: 1,
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetConfig {
    /// Seed for deck shuffling and hint search.
    pub seed: u64,

    /// Cards dealt when the table is empty.
    pub initial_deal: usize,

    /// Cards dealt when the table already has cards.
    pub subsequent_deal: usize,

    /// Deal `subsequent_deal` cards as soon as a matched trio is removed.
    pub refill_after_match: bool,

    /// Score deltas.
    pub scoring: ScoringPolicy,
}

impl Default for SetConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            initial_deal: 12,
            subsequent_deal: 3,
            refill_after_match: false,
            scoring: ScoringPolicy::default(),
        }
    }
}

impl SetConfig {
    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set both deal sizes.
    #[must_use]
    pub fn with_deal_sizes(mut self, initial: usize, subsequent: usize) -> Self {
        self.initial_deal = initial;
        self.subsequent_deal = subsequent;
        self
    }

    /// Refill the table automatically after a matched trio is removed.
    #[must_use]
    pub fn with_refill_after_match(mut self, refill: bool) -> Self {
        self.refill_after_match = refill;
        self
    }

    /// Set the scoring policy.
    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringPolicy) -> Self {
        self.scoring = scoring;
        self
    }

    /// Check that the configuration describes a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_deal == 0 {
            return Err(ConfigError::ZeroDeal("initial_deal"));
        }
        if self.subsequent_deal == 0 {
            return Err(ConfigError::ZeroDeal("subsequent_deal"));
        }
        if self.initial_deal > DECK_SIZE {
            return Err(ConfigError::DealExceedsDeck(self.initial_deal));
        }

        let s = &self.scoring;
        for (name, value) in [
            ("match_bonus", s.match_bonus),
            ("mismatch_penalty", s.mismatch_penalty),
            ("hint_penalty", s.hint_penalty),
            ("shuffle_penalty", s.shuffle_penalty),
        ] {
            if value < 0 {
                return Err(ConfigError::NegativeScore { name, value });
            }
        }

        Ok(())
    }
}

/// Reasons a `SetConfig` is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must deal at least one card")]
    ZeroDeal(&'static str),

    #[error("initial_deal of {0} exceeds the deck size")]
    DealExceedsDeck(usize),

    #[error("{name} must not be negative (got {value})")]
    NegativeScore { name: &'static str, value: i64 },
}
