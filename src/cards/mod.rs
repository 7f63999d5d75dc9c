//! Card model: features, instances, and the deck.
//!
//! ## Key Types
//!
//! - `Trio`: One of three feature values
//! - `Features`: One `Trio` per axis (count, shape, shading, color)
//! - `Card`: Identity + features + lifecycle status
//! - `generate_deck` / `is_set`: The 81-card universe and the Set rule
//!
//! Cards are compared by id for lifecycle tracking and by features only
//! inside `is_set`.

pub mod attributes;
pub mod deck;
pub mod instance;

pub use attributes::{FeatureAxis, Features, Trio};
pub use deck::{generate_deck, is_set, is_set_cards, DECK_SIZE};
pub use instance::{Card, CardStatus};
