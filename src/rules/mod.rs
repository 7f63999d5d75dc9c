//! Game rules: selection state machine, completion search, and the engine.
//!
//! `SetGame` composes the pieces:
//! - `selection`: Idle / Partial / Resolved trio tracking
//! - `hint`: search for a card that completes a Set
//! - `engine`: intents, queries, scoring, dealing, shuffling

pub mod engine;
pub mod hint;
pub mod selection;

pub use engine::{IntentOutcome, InvariantViolation, SetGame, ShuffleOutcome};
pub use hint::{contains_set, find_completion};
pub use selection::{SelectOutcome, Selection, SelectionState, TrioOutcome};
