//! Core engine types: card ids, RNG, configuration, intents.
//!
//! These are the building blocks the card model and the rules engine share.

pub mod entity;
pub mod rng;
pub mod config;
pub mod intent;

pub use entity::{CardId, CardIdAllocator};
pub use rng::GameRng;
pub use config::{ConfigError, ScoringPolicy, SetConfig};
pub use intent::{Intent, IntentRecord, ParseIntentError};
