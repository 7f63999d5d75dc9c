//! Selection state machine.
//!
//! The player builds a trio one card at a time:
//!
//! - **Idle**: nothing selected
//! - **Partial**: one or two cards selected
//! - **Resolved**: three cards selected and judged; waiting for the next
//!   intent to clear them
//!
//! `Selection` only tracks ids. The engine changes card statuses in the same
//! call that changes the selection, so the two never drift apart.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::entity::CardId;

/// Verdict on a completed trio.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrioOutcome {
    Matched,
    Mismatched,
}

/// Coarse state of the selection, for presentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionState {
    Idle,
    Partial,
    Resolved,
}

/// Result of tapping a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectOutcome {
    /// Unknown id, or a card that is not on the table. Nothing changed.
    Ignored,
    /// The card joined the selection.
    Selected,
    /// The card left the selection.
    Deselected,
    /// The card completed a trio that forms a Set.
    Matched([CardId; 3]),
    /// The card completed a trio that does not form a Set.
    Mismatched([CardId; 3]),
    /// A pending matched trio was removed and the tapped card went with it.
    Cleared,
}

/// What `Selection::toggle` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Toggle {
    Added,
    Removed,
    /// The card was the third; the caller must judge the trio and call
    /// `Selection::complete`.
    Completed([CardId; 3]),
}

/// Current selection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    Idle,
    Partial(SmallVec<[CardId; 2]>),
    Resolved {
        trio: [CardId; 3],
        outcome: TrioOutcome,
    },
}

impl Selection {
    /// Coarse state.
    #[must_use]
    pub fn state(&self) -> SelectionState {
        match self {
            Selection::Idle => SelectionState::Idle,
            Selection::Partial(_) => SelectionState::Partial,
            Selection::Resolved { .. } => SelectionState::Resolved,
        }
    }

    /// All selected ids, including a judged trio.
    #[must_use]
    pub fn ids(&self) -> &[CardId] {
        match self {
            Selection::Idle => &[],
            Selection::Partial(ids) => ids.as_slice(),
            Selection::Resolved { trio, .. } => trio.as_slice(),
        }
    }

    /// Ids selected toward a trio that has not been judged yet.
    #[must_use]
    pub fn building(&self) -> &[CardId] {
        match self {
            Selection::Partial(ids) => ids.as_slice(),
            _ => &[],
        }
    }

    /// Number of selected ids (0..=3).
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids().len()
    }

    /// Nothing selected?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids().is_empty()
    }

    /// Is `id` part of the selection?
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.ids().contains(&id)
    }

    /// The judged trio, if one is waiting.
    #[must_use]
    pub fn pending(&self) -> Option<([CardId; 3], TrioOutcome)> {
        match self {
            Selection::Resolved { trio, outcome } => Some((*trio, *outcome)),
            _ => None,
        }
    }

    /// Add or remove `id`. Must not be called while a trio is pending.
    pub(crate) fn toggle(&mut self, id: CardId) -> Toggle {
        debug_assert!(self.pending().is_none(), "resolve the pending trio first");

        let mut ids: SmallVec<[CardId; 2]> = SmallVec::from_slice(self.building());

        if let Some(pos) = ids.iter().position(|&other| other == id) {
            ids.remove(pos);
            *self = if ids.is_empty() {
                Selection::Idle
            } else {
                Selection::Partial(ids)
            };
            return Toggle::Removed;
        }

        if let [a, b] = ids[..] {
            *self = Selection::Idle;
            return Toggle::Completed([a, b, id]);
        }

        ids.push(id);
        *self = Selection::Partial(ids);
        Toggle::Added
    }

    /// Record the verdict on a trio returned by `toggle`.
    pub(crate) fn complete(&mut self, trio: [CardId; 3], outcome: TrioOutcome) {
        *self = Selection::Resolved { trio, outcome };
    }

    /// Clear a pending trio, returning it.
    pub(crate) fn take_pending(&mut self) -> Option<([CardId; 3], TrioOutcome)> {
        let pending = self.pending();
        if pending.is_some() {
            *self = Selection::Idle;
        }
        pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_on_and_off() {
        let mut sel = Selection::default();
        assert_eq!(sel.state(), SelectionState::Idle);

        assert_eq!(sel.toggle(CardId(1)), Toggle::Added);
        assert_eq!(sel.state(), SelectionState::Partial);
        assert_eq!(sel.ids(), &[CardId(1)]);

        assert_eq!(sel.toggle(CardId(1)), Toggle::Removed);
        assert_eq!(sel, Selection::Idle);
    }

    #[test]
    fn test_remove_keeps_other() {
        let mut sel = Selection::default();
        sel.toggle(CardId(1));
        sel.toggle(CardId(2));

        assert_eq!(sel.toggle(CardId(1)), Toggle::Removed);
        assert_eq!(sel.ids(), &[CardId(2)]);
        assert_eq!(sel.len(), 1);
    }

    #[test]
    fn test_third_card_completes() {
        let mut sel = Selection::default();
        sel.toggle(CardId(4));
        sel.toggle(CardId(5));

        let trio = match sel.toggle(CardId(6)) {
            Toggle::Completed(trio) => trio,
            other => panic!("expected completed trio, got {:?}", other),
        };
        assert_eq!(trio, [CardId(4), CardId(5), CardId(6)]);

        sel.complete(trio, TrioOutcome::Mismatched);
        assert_eq!(sel.state(), SelectionState::Resolved);
        assert_eq!(sel.len(), 3);
        assert!(sel.contains(CardId(5)));
        assert!(sel.building().is_empty());
        assert_eq!(sel.pending(), Some((trio, TrioOutcome::Mismatched)));
    }

    #[test]
    fn test_take_pending() {
        let mut sel = Selection::default();
        assert_eq!(sel.take_pending(), None);

        let trio = [CardId(1), CardId(2), CardId(3)];
        sel.complete(trio, TrioOutcome::Matched);

        assert_eq!(sel.take_pending(), Some((trio, TrioOutcome::Matched)));
        assert!(sel.is_empty());
        assert_eq!(sel.take_pending(), None);
    }

    #[test]
    fn test_take_pending_leaves_partial() {
        let mut sel = Selection::default();
        sel.toggle(CardId(1));

        assert_eq!(sel.take_pending(), None);
        assert_eq!(sel.ids(), &[CardId(1)]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "resolve the pending trio first")]
    fn test_toggle_while_pending() {
        let mut sel = Selection::default();
        sel.complete([CardId(1), CardId(2), CardId(3)], TrioOutcome::Matched);
        sel.toggle(CardId(4));
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = SelectOutcome::Matched([CardId(1), CardId(2), CardId(3)]);
        let json = serde_json::to_string(&outcome).unwrap();
        let deserialized: SelectOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(outcome, deserialized);
    }
}
