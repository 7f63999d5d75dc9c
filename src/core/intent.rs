//! Intents: the requests a presentation layer sends to the engine.
//!
//! Every state change goes through one of five intents. The engine records
//! each applied intent in its history so a game can be replayed from the
//! same seed.
//!
//! Intents also have a short textual form for terminal hosts:
//!
//! ```
//! use set_engine::core::{CardId, Intent};
//!
//! assert_eq!("deal".parse::<Intent>().unwrap(), Intent::Deal);
//! assert_eq!("select 17".parse::<Intent>().unwrap(), Intent::Select(CardId(17)));
//! assert_eq!(Intent::Select(CardId(17)).to_string(), "select 17");
//! assert!("select".parse::<Intent>().is_err());
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entity::CardId;

/// A request to change the game state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Discard the current game and start over with a fresh deck.
    NewGame,
    /// Deal cards from the deck onto the table.
    Deal,
    /// Tap a card on the table.
    Select(CardId),
    /// Return the table to the deck, reshuffle, and re-deal.
    Shuffle,
    /// Select a card that completes a Set with the current selection.
    Hint,
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Intent::NewGame => write!(f, "new"),
            Intent::Deal => write!(f, "deal"),
            Intent::Select(id) => write!(f, "select {}", id.raw()),
            Intent::Shuffle => write!(f, "shuffle"),
            Intent::Hint => write!(f, "hint"),
        }
    }
}

/// Error from parsing the textual form of an intent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseIntentError {
    #[error("empty command")]
    Empty,

    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    #[error("`select` needs a card id")]
    MissingCardId,

    #[error("invalid card id `{0}`")]
    InvalidCardId(String),

    #[error("unexpected argument `{0}`")]
    UnexpectedArgument(String),
}

impl FromStr for Intent {
    type Err = ParseIntentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let command = words.next().ok_or(ParseIntentError::Empty)?;

        let intent = match command.to_ascii_lowercase().as_str() {
            "new" | "newgame" => Intent::NewGame,
            "deal" | "d" => Intent::Deal,
            "shuffle" => Intent::Shuffle,
            "hint" | "h" => Intent::Hint,
            "select" | "s" => {
                let raw = words.next().ok_or(ParseIntentError::MissingCardId)?;
                let raw_id = raw.trim_start_matches('#');
                let id = raw_id
                    .parse::<u32>()
                    .map_err(|_| ParseIntentError::InvalidCardId(raw.to_string()))?;
                Intent::Select(CardId(id))
            }
            other => return Err(ParseIntentError::UnknownCommand(other.to_string())),
        };

        match words.next() {
            Some(extra) => Err(ParseIntentError::UnexpectedArgument(extra.to_string())),
            None => Ok(intent),
        }
    }
}

/// An applied intent with its position in the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentRecord {
    /// The intent that was applied.
    pub intent: Intent,

    /// Position in the engine's history (0-based). Counts across
    /// `NewGame`, since history spans the whole session.
    pub sequence: u64,

    /// Score after the intent was applied.
    pub score_after: i64,
}

impl IntentRecord {
    /// Create a new intent record.
    #[must_use]
    pub fn new(intent: Intent, sequence: u64, score_after: i64) -> Self {
        Self {
            intent,
            sequence,
            score_after,
        }
    }
}
