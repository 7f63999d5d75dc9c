//! The 81-card universe and the Set predicate.
//!
//! ## Usage
//!
//! ```
//! use set_engine::cards::{generate_deck, is_set, DECK_SIZE};
//! use set_engine::core::CardIdAllocator;
//!
//! let mut alloc = CardIdAllocator::new();
//! let deck = generate_deck(&mut alloc);
//! assert_eq!(deck.len(), DECK_SIZE);
//!
//! // 0000, 0001, 0002 differ only in color: a Set
//! assert!(is_set([deck[0].features(), deck[1].features(), deck[2].features()]));
//!
//! // 0000, 0001, 0010: shading and color are two-out-of-three
//! assert!(!is_set([deck[0].features(), deck[1].features(), deck[3].features()]));
//! ```

use super::attributes::{FeatureAxis, Features, Trio};
use super::instance::Card;
use crate::core::entity::CardIdAllocator;

/// Number of distinct cards: 3 values on each of 4 axes.
pub const DECK_SIZE: usize = 81;

/// Generate one card per feature combination, all in the deck.
///
/// Cards come out count-major (count, shape, shading, color), each with a
/// fresh id from `alloc`.
pub fn generate_deck(alloc: &mut CardIdAllocator) -> Vec<Card> {
    Features::all()
        .map(|features| Card::new(alloc.alloc(), features))
        .collect()
}

/// Do three cards' features form a Set?
///
/// On every axis the values must be all equal or all different.
#[must_use]
pub fn is_set(trio: [&Features; 3]) -> bool {
    let [a, b, c] = trio;
    FeatureAxis::ALL
        .iter()
        .all(|&axis| Trio::third(a.get(axis), b.get(axis)) == c.get(axis))
}

/// Slice form of [`is_set`] for callers holding cards.
///
/// Passing anything other than three cards is a caller bug: it panics in
/// debug builds and returns `false` otherwise.
#[must_use]
pub fn is_set_cards(cards: &[&Card]) -> bool {
    debug_assert_eq!(cards.len(), 3, "a Set is checked on exactly 3 cards");
    match cards {
        [a, b, c] => is_set([a.features(), b.features(), c.features()]),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::instance::CardStatus;
    use crate::core::entity::CardId;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn f(count: Trio, shape: Trio, shading: Trio, color: Trio) -> Features {
        Features::new(count, shape, shading, color)
    }

    fn trio_strategy() -> impl Strategy<Value = Trio> {
        prop_oneof![Just(Trio::Zero), Just(Trio::One), Just(Trio::Two)]
    }

    fn features_strategy() -> impl Strategy<Value = Features> {
        (
            trio_strategy(),
            trio_strategy(),
            trio_strategy(),
            trio_strategy(),
        )
            .prop_map(|(a, b, c, d)| Features::new(a, b, c, d))
    }

    #[test]
    fn test_generate_deck() {
        let mut alloc = CardIdAllocator::new();
        let deck = generate_deck(&mut alloc);

        assert_eq!(deck.len(), DECK_SIZE);

        let ids: HashSet<_> = deck.iter().map(|c| c.id()).collect();
        assert_eq!(ids.len(), DECK_SIZE);

        let features: HashSet<_> = deck.iter().map(|c| *c.features()).collect();
        assert_eq!(features.len(), DECK_SIZE);

        assert!(deck.iter().all(|c| c.status() == CardStatus::InDeck));
    }

    #[test]
    fn test_generate_deck_fresh_ids() {
        let mut alloc = CardIdAllocator::new();
        let first = generate_deck(&mut alloc);
        let second = generate_deck(&mut alloc);

        let first_ids: HashSet<CardId> = first.iter().map(|c| c.id()).collect();
        assert!(second.iter().all(|c| !first_ids.contains(&c.id())));
    }

    #[test]
    fn test_generate_deck_is_stable() {
        let a = generate_deck(&mut CardIdAllocator::new());
        let b = generate_deck(&mut CardIdAllocator::new());
        assert_eq!(a, b);
    }

    #[test]
    fn test_identical_cards_form_set() {
        let x = f(Trio::One, Trio::Two, Trio::Zero, Trio::One);
        assert!(is_set([&x, &x, &x]));
    }

    #[test]
    fn test_all_different_forms_set() {
        let a = f(Trio::Zero, Trio::Zero, Trio::Zero, Trio::Zero);
        let b = f(Trio::One, Trio::One, Trio::One, Trio::One);
        let c = f(Trio::Two, Trio::Two, Trio::Two, Trio::Two);
        assert!(is_set([&a, &b, &c]));
    }

    #[test]
    fn test_one_axis_differing_forms_set() {
        let a = f(Trio::Zero, Trio::One, Trio::Two, Trio::Zero);
        let b = f(Trio::One, Trio::One, Trio::Two, Trio::Zero);
        let c = f(Trio::Two, Trio::One, Trio::Two, Trio::Zero);
        assert!(is_set([&a, &b, &c]));
    }

    #[test]
    fn test_two_out_of_three_is_not_set() {
        let a = f(Trio::Zero, Trio::One, Trio::Two, Trio::Zero);
        let b = f(Trio::Zero, Trio::One, Trio::Two, Trio::Zero);
        let c = f(Trio::One, Trio::One, Trio::Two, Trio::Zero);
        assert!(!is_set([&a, &b, &c]));
    }

    #[test]
    fn test_mixed_axes() {
        // count all same, shape all different, shading all same, color two-of-three
        let a = f(Trio::One, Trio::Zero, Trio::Zero, Trio::Zero);
        let b = f(Trio::One, Trio::One, Trio::Zero, Trio::Zero);
        let c = f(Trio::One, Trio::Two, Trio::Zero, Trio::One);
        assert!(!is_set([&a, &b, &c]));

        let c = f(Trio::One, Trio::Two, Trio::Zero, Trio::Zero);
        assert!(is_set([&a, &b, &c]));
    }

    #[test]
    fn test_is_set_cards() {
        let a = Card::new(CardId(0), f(Trio::Zero, Trio::Zero, Trio::Zero, Trio::Zero));
        let b = Card::new(CardId(1), f(Trio::Zero, Trio::Zero, Trio::Zero, Trio::One));
        let c = Card::new(CardId(2), f(Trio::Zero, Trio::Zero, Trio::Zero, Trio::Two));
        assert!(is_set_cards(&[&a, &b, &c]));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "exactly 3 cards")]
    fn test_is_set_cards_wrong_arity() {
        let a = Card::new(CardId(0), f(Trio::Zero, Trio::Zero, Trio::Zero, Trio::Zero));
        let _ = is_set_cards(&[&a, &a]);
    }

    #[test]
    fn test_sets_in_full_deck() {
        // Every pair of distinct cards has exactly one completing card,
        // so the deck holds 81 * 80 / 6 = 1080 Sets.
        let deck = generate_deck(&mut CardIdAllocator::new());
        let mut count = 0;
        for i in 0..deck.len() {
            for j in (i + 1)..deck.len() {
                for k in (j + 1)..deck.len() {
                    if is_set([deck[i].features(), deck[j].features(), deck[k].features()]) {
                        count += 1;
                    }
                }
            }
        }
        assert_eq!(count, 1080);
    }

    proptest! {
        #[test]
        fn prop_is_set_symmetric(
            a in features_strategy(),
            b in features_strategy(),
            c in features_strategy(),
        ) {
            let expected = is_set([&a, &b, &c]);
            prop_assert_eq!(is_set([&a, &c, &b]), expected);
            prop_assert_eq!(is_set([&b, &a, &c]), expected);
            prop_assert_eq!(is_set([&b, &c, &a]), expected);
            prop_assert_eq!(is_set([&c, &a, &b]), expected);
            prop_assert_eq!(is_set([&c, &b, &a]), expected);
        }

        #[test]
        fn prop_completing_always_forms_set(a in features_strategy(), b in features_strategy()) {
            let c = Features::completing(&a, &b);
            prop_assert!(is_set([&a, &b, &c]));
        }
    }
}
