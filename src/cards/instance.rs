//! Card instances - identity, features, and lifecycle status.
//!
//! `Card` is the read-only projection the engine hands to a presentation
//! layer. Only the engine changes a card's status; features never change.

use serde::{Deserialize, Serialize};

use super::attributes::Features;
use crate::core::entity::CardId;

/// Where a card is in its lifecycle.
///
/// `Normal`, `Selected`, `Matched`, and `Mismatched` are all "dealt":
/// the card is on the table. `Matched` and `Mismatched` only exist while a
/// completed trio waits for the next intent to resolve it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardStatus {
    /// Not yet dealt.
    InDeck,
    /// On the table, not highlighted.
    Normal,
    /// On the table and part of the current selection.
    Selected,
    /// Part of a completed trio that forms a Set.
    Matched,
    /// Part of a completed trio that does not form a Set.
    Mismatched,
    /// Matched and taken off the table. Terminal.
    Removed,
}

impl CardStatus {
    /// Is the card on the table?
    #[must_use]
    pub const fn is_dealt(self) -> bool {
        matches!(
            self,
            CardStatus::Normal | CardStatus::Selected | CardStatus::Matched | CardStatus::Mismatched
        )
    }

    /// Is the card highlighted (selected or part of a completed trio)?
    #[must_use]
    pub const fn is_highlighted(self) -> bool {
        matches!(
            self,
            CardStatus::Selected | CardStatus::Matched | CardStatus::Mismatched
        )
    }
}

/// A card in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    features: Features,
    status: CardStatus,
}

impl Card {
    /// Create a card that has not been dealt yet.
    #[must_use]
    pub const fn new(id: CardId, features: Features) -> Self {
        Self {
            id,
            features,
            status: CardStatus::InDeck,
        }
    }

    /// Unique identity.
    #[must_use]
    pub const fn id(&self) -> CardId {
        self.id
    }

    /// Feature values.
    #[must_use]
    pub const fn features(&self) -> &Features {
        &self.features
    }

    /// Current lifecycle status.
    #[must_use]
    pub const fn status(&self) -> CardStatus {
        self.status
    }

    /// Is the card on the table?
    #[must_use]
    pub const fn is_dealt(&self) -> bool {
        self.status.is_dealt()
    }

    pub(crate) fn set_status(&mut self, status: CardStatus) {
        debug_assert!(
            self.status != CardStatus::Removed,
            "{} is removed and cannot become {:?}",
            self.id,
            status
        );
        self.status = status;
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.id, self.features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::attributes::Trio;

    fn test_features() -> Features {
        Features::new(Trio::One, Trio::Zero, Trio::Two, Trio::One)
    }

    #[test]
    fn test_new_card_is_in_deck() {
        let card = Card::new(CardId(3), test_features());

        assert_eq!(card.id(), CardId(3));
        assert_eq!(card.features(), &test_features());
        assert_eq!(card.status(), CardStatus::InDeck);
        assert!(!card.is_dealt());
    }

    #[test]
    fn test_dealt_statuses() {
        assert!(!CardStatus::InDeck.is_dealt());
        assert!(CardStatus::Normal.is_dealt());
        assert!(CardStatus::Selected.is_dealt());
        assert!(CardStatus::Matched.is_dealt());
        assert!(CardStatus::Mismatched.is_dealt());
        assert!(!CardStatus::Removed.is_dealt());
    }

    #[test]
    fn test_highlighted_statuses() {
        assert!(!CardStatus::Normal.is_highlighted());
        assert!(CardStatus::Selected.is_highlighted());
        assert!(CardStatus::Matched.is_highlighted());
        assert!(CardStatus::Mismatched.is_highlighted());
        assert!(!CardStatus::Removed.is_highlighted());
    }

    #[test]
    fn test_same_features_different_cards() {
        let a = Card::new(CardId(1), test_features());
        let b = Card::new(CardId(2), test_features());

        assert_eq!(a.features(), b.features());
        assert_ne!(a, b);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "is removed")]
    fn test_removed_is_terminal() {
        let mut card = Card::new(CardId(1), test_features());
        card.set_status(CardStatus::Removed);
        card.set_status(CardStatus::Normal);
    }

    #[test]
    fn test_display() {
        let card = Card::new(CardId(9), test_features());
        assert_eq!(card.to_string(), "#9[1021]");
    }

    #[test]
    fn test_card_serialization() {
        let mut card = Card::new(CardId(10), test_features());
        card.set_status(CardStatus::Mismatched);

        let json = serde_json::to_string(&card).unwrap();
        assert!(json.contains("\"mismatched\""));

        let deserialized: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, deserialized);
    }
}
