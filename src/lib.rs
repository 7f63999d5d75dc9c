//! # set-engine
//!
//! Rules engine for the solitaire Set card game.
//!
//! ## Design Principles
//!
//! 1. **Explicit transitions**: Every intent changes the selection and the
//!    card statuses together in one call. Nothing reacts to writes.
//!
//! 2. **Identity over value**: Cards are tracked by `CardId`. Feature values
//!    are only compared by the Set predicate.
//!
//! 3. **Owned state**: A host owns one `SetGame` value and threads it through
//!    intent calls. There is no global game.
//!
//! ## Game Flow
//!
//! - `deal`: 12 cards onto an empty table, 3 otherwise
//! - `select`: build a trio; the third card scores a match or a mismatch
//! - `hint`: select a card that completes a Set, for a penalty
//! - `shuffle`: reshuffle the table into the deck and re-deal
//! - `new_game`: start over with 81 fresh cards
//!
//! ## Modules
//!
//! - `core`: Card ids, RNG, configuration, intents
//! - `cards`: Features, card instances, deck generation, the Set rule
//! - `rules`: Selection state machine, hint search, the game engine

pub mod core;
pub mod cards;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    CardId, CardIdAllocator, GameRng,
    SetConfig, ScoringPolicy, ConfigError,
    Intent, IntentRecord, ParseIntentError,
};

pub use crate::cards::{
    Card, CardStatus, FeatureAxis, Features, Trio,
    generate_deck, is_set, is_set_cards, DECK_SIZE,
};

pub use crate::rules::{
    SetGame, IntentOutcome, InvariantViolation, ShuffleOutcome,
    Selection, SelectionState, SelectOutcome, TrioOutcome,
    contains_set, find_completion,
};
