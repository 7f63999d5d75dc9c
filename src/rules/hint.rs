//! Completion search.
//!
//! Given the cards already selected (0, 1, or 2) and a pool of candidate
//! cards, find a card from the pool that belongs to a Set with the
//! selection. Combinations of the missing size are enumerated recursively
//! in pool order, so callers shuffle the pool when they want variety.

use smallvec::SmallVec;
use tracing::trace;

use crate::cards::{is_set_cards, Card};

type Picked<'a> = SmallVec<[&'a Card; 3]>;

/// First pool card of the first combination that completes a Set.
///
/// Returns `None` if the selection already has three cards or no
/// combination of pool cards completes it.
#[must_use]
pub fn find_completion<'a>(selected: &[&'a Card], pool: &[&'a Card]) -> Option<&'a Card> {
    if selected.len() >= 3 {
        return None;
    }

    let mut trio: Picked<'a> = SmallVec::from_slice(selected);
    search(&mut trio, selected.len(), pool)
}

/// Does any three-card combination of `pool` form a Set?
#[must_use]
pub fn contains_set(pool: &[&Card]) -> bool {
    find_completion(&[], pool).is_some()
}

fn search<'a>(trio: &mut Picked<'a>, fixed: usize, pool: &[&'a Card]) -> Option<&'a Card> {
    if trio.len() == 3 {
        if is_set_cards(trio.as_slice()) {
            trace!(first = %trio[fixed], "completion found");
            return Some(trio[fixed]);
        }
        return None;
    }

    for (i, &card) in pool.iter().enumerate() {
        trio.push(card);
        let found = search(trio, fixed, &pool[i + 1..]);
        trio.pop();
        if found.is_some() {
            return found;
        }
    }

    None
}
