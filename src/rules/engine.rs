//! The Set game engine.
//!
//! `SetGame` owns every card of one game, the selection, the score, and the
//! RNG streams. Presentation code sends intents (`deal`, `select`, `hint`,
//! `shuffle`, `new_game`) and re-reads the queries afterwards; there are no
//! callbacks.
//!
//! ## Usage
//!
//! ```
//! use set_engine::{CardStatus, SetConfig, SetGame};
//!
//! let mut game = SetGame::new(SetConfig::default().with_seed(7)).unwrap();
//! assert_eq!(game.deck_count(), 81);
//!
//! game.deal();
//! assert_eq!(game.visible_cards().len(), 12);
//! assert_eq!(game.deck_count(), 69);
//!
//! let first = game.visible_cards()[0].id();
//! game.select(first);
//! assert_eq!(game.card(first).unwrap().status(), CardStatus::Selected);
//! ```
//!
//! ## Values
//!
//! Cards and history live in `im` vectors, so cloning a game is cheap.
//! Clone it to explore "what if" moves without touching the real game.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, trace};

use super::hint::{contains_set, find_completion};
use super::selection::{SelectOutcome, Selection, SelectionState, Toggle, TrioOutcome};
use crate::cards::{generate_deck, is_set_cards, Card, CardStatus};
use crate::core::{CardId, CardIdAllocator, ConfigError, GameRng, Intent, IntentRecord, SetConfig};

/// Result of a shuffle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShuffleOutcome {
    /// Cards dealt after reshuffling.
    pub dealt: usize,
    /// Could the selection have been completed (and was the shuffle
    /// penalty applied)?
    pub penalized: bool,
}

/// Result of `SetGame::apply`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntentOutcome {
    NewGame,
    Dealt(usize),
    Selected(SelectOutcome),
    Shuffled(ShuffleOutcome),
    Hinted(Option<CardId>),
}

/// A broken internal invariant. Seeing one means an engine bug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("{id} has status {status:?}, selection expects {expected:?}")]
    StatusMismatch {
        id: CardId,
        status: CardStatus,
        expected: CardStatus,
    },

    #[error("{0} is highlighted but not selected")]
    StrayHighlight(CardId),

    #[error("{0} is selected but not in the game")]
    UnknownSelected(CardId),

    #[error("position index out of sync for {0}")]
    PositionOutOfSync(CardId),
}

/// A game of solitaire Set.
#[derive(Clone, Debug)]
pub struct SetGame {
    config: SetConfig,

    /// Every card of the current game. Order decides which in-deck card is
    /// dealt next; it changes only on shuffle.
    cards: Vector<Card>,

    /// Card id -> index into `cards`.
    positions: FxHashMap<CardId, usize>,

    selection: Selection,
    score: i64,

    /// Survives `new_game`, so ids are never reused.
    ids: CardIdAllocator,

    deck_rng: GameRng,
    hint_rng: GameRng,

    history: Vector<IntentRecord>,
}

impl Default for SetGame {
    fn default() -> Self {
        Self::build(SetConfig::default())
    }
}

impl SetGame {
    /// Create a game with a shuffled deck and nothing dealt.
    pub fn new(config: SetConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Rebuild a game by applying recorded intents to a fresh game.
    ///
    /// With the same config (and seed) this reproduces the recorded game.
    pub fn replay(config: SetConfig, records: &[IntentRecord]) -> Result<Self, ConfigError> {
        let mut game = Self::new(config)?;
        for record in records {
            game.apply(record.intent);
        }
        Ok(game)
    }

    fn build(config: SetConfig) -> Self {
        let root = GameRng::new(config.seed);
        let mut game = Self {
            deck_rng: root.for_context("deck"),
            hint_rng: root.for_context("hint"),
            config,
            cards: Vector::new(),
            positions: FxHashMap::default(),
            selection: Selection::Idle,
            score: 0,
            ids: CardIdAllocator::new(),
            history: Vector::new(),
        };
        game.reset();
        game
    }

    // === Intents ===

    /// Apply any intent.
    pub fn apply(&mut self, intent: Intent) -> IntentOutcome {
        match intent {
            Intent::NewGame => {
                self.new_game();
                IntentOutcome::NewGame
            }
            Intent::Deal => IntentOutcome::Dealt(self.deal()),
            Intent::Select(id) => IntentOutcome::Selected(self.select(id)),
            Intent::Shuffle => IntentOutcome::Shuffled(self.shuffle()),
            Intent::Hint => IntentOutcome::Hinted(self.hint()),
        }
    }

    /// Throw away the current game and start over with 81 fresh cards.
    ///
    /// Nothing is dealt; the score returns to zero. History keeps growing so
    /// the whole session can be replayed.
    pub fn new_game(&mut self) {
        self.reset();
        self.record(Intent::NewGame);
    }

    /// Deal cards onto the table.
    ///
    /// An empty table gets `initial_deal` cards, otherwise `subsequent_deal`.
    /// A pending trio is resolved first. Deals whatever is left when the deck
    /// runs short. Returns the number of cards dealt.
    pub fn deal(&mut self) -> usize {
        self.resolve_pending();
        let dealt = self.deal_batch(self.deal_size());
        self.record(Intent::Deal);
        dealt
    }

    /// Tap a card.
    ///
    /// Taps on unknown ids or cards that are not on the table are ignored.
    pub fn select(&mut self, id: CardId) -> SelectOutcome {
        let outcome = self.tap(id);
        self.record(Intent::Select(id));
        outcome
    }

    /// Select a card that completes a Set with the current selection.
    ///
    /// Costs `hint_penalty` when a card is found. Returns the hinted card, or
    /// `None` (and changes nothing) when no Set can be completed.
    pub fn hint(&mut self) -> Option<CardId> {
        let found = self.find_hint();
        match found {
            Some(id) => {
                self.score -= self.config.scoring.hint_penalty;
                self.tap(id);
                debug!(%id, score = self.score, "hint used");
            }
            None => debug!("no hint available"),
        }
        self.record(Intent::Hint);
        found
    }

    /// Return the table to the deck, reshuffle everything, and re-deal.
    ///
    /// Costs `shuffle_penalty` if the current selection could have been
    /// completed into a Set, the same condition under which `hint` finds a
    /// card.
    pub fn shuffle(&mut self) -> ShuffleOutcome {
        let penalized = self.can_complete_selection();
        if penalized {
            self.score -= self.config.scoring.shuffle_penalty;
        }

        self.resolve_pending();
        self.selection = Selection::Idle;

        let mut cards: Vec<Card> = self.cards.iter().copied().collect();
        for card in cards.iter_mut().filter(|c| c.is_dealt()) {
            card.set_status(CardStatus::InDeck);
        }
        self.deck_rng.shuffle(&mut cards);
        self.install(cards);

        let dealt = self.deal_batch(self.deal_size());
        debug!(dealt, penalized, score = self.score, "shuffled");
        self.record(Intent::Shuffle);

        ShuffleOutcome { dealt, penalized }
    }

    // === Queries ===

    /// Configuration this game was created with.
    #[must_use]
    pub fn config(&self) -> &SetConfig {
        &self.config
    }

    /// Every card in sequence order, whatever its status.
    pub fn cards(&self) -> impl Iterator<Item = &Card> + '_ {
        self.cards.iter()
    }

    /// Cards on the table, in sequence order.
    #[must_use]
    pub fn visible_cards(&self) -> Vec<Card> {
        self.cards.iter().filter(|c| c.is_dealt()).copied().collect()
    }

    /// Look up a card by id.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<Card> {
        self.card_ref(id).copied()
    }

    /// Cards not yet dealt.
    #[must_use]
    pub fn deck_count(&self) -> usize {
        self.count_where(|status| status == CardStatus::InDeck)
    }

    /// Cards on the table.
    #[must_use]
    pub fn dealt_count(&self) -> usize {
        self.count_where(CardStatus::is_dealt)
    }

    /// Cards matched and taken off the table.
    #[must_use]
    pub fn removed_count(&self) -> usize {
        self.count_where(|status| status == CardStatus::Removed)
    }

    /// Running score.
    #[must_use]
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Current selection.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Coarse selection state.
    #[must_use]
    pub fn selection_state(&self) -> SelectionState {
        self.selection.state()
    }

    /// Selected cards, including a judged trio.
    #[must_use]
    pub fn selected(&self) -> Vec<Card> {
        self.selection
            .ids()
            .iter()
            .filter_map(|&id| self.card(id))
            .collect()
    }

    /// Verdict on the trio waiting to be resolved, if any.
    #[must_use]
    pub fn pending_outcome(&self) -> Option<TrioOutcome> {
        self.selection.pending().map(|(_, outcome)| outcome)
    }

    /// Is there a Set among the table cards that are still in play?
    ///
    /// Cards of a pending matched trio do not count; they are about to leave.
    #[must_use]
    pub fn has_available_set(&self) -> bool {
        let pool: Vec<&Card> = self
            .cards
            .iter()
            .filter(|c| c.is_dealt() && c.status() != CardStatus::Matched)
            .collect();
        contains_set(&pool)
    }

    /// Can the partial selection be completed into a Set from the table?
    ///
    /// Draws on Normal and Mismatched cards, like `hint`. A pending trio
    /// counts as an empty selection.
    #[must_use]
    pub fn can_complete_selection(&self) -> bool {
        let (selected, pool) =
            completion_inputs(&self.cards, &self.positions, self.selection.building());
        find_completion(&selected, &pool).is_some()
    }

    /// The deck is empty and no Set is left on the table.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.deck_count() == 0 && !self.has_available_set()
    }

    /// Every intent applied since the game was created.
    ///
    /// Append-only: ignored selects are recorded too, and `new_game` does
    /// not clear it, so it grows for the life of the `SetGame`.
    #[must_use]
    pub fn history(&self) -> &Vector<IntentRecord> {
        &self.history
    }

    /// Verify the internal invariants.
    ///
    /// Statuses must agree with the selection: `Selected` cards are exactly
    /// the partial selection and `Matched`/`Mismatched` cards are exactly the
    /// pending trio.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        for (index, card) in self.cards.iter().enumerate() {
            let id = card.id();
            if self.positions.get(&id) != Some(&index) {
                return Err(InvariantViolation::PositionOutOfSync(id));
            }

            match self.expected_highlight(id) {
                Some(expected) if card.status() != expected => {
                    return Err(InvariantViolation::StatusMismatch {
                        id,
                        status: card.status(),
                        expected,
                    });
                }
                None if card.status().is_highlighted() => {
                    return Err(InvariantViolation::StrayHighlight(id));
                }
                _ => {}
            }
        }

        if let Some(&id) = self
            .selection
            .ids()
            .iter()
            .find(|&&id| !self.positions.contains_key(&id))
        {
            return Err(InvariantViolation::UnknownSelected(id));
        }

        Ok(())
    }

    // === Transitions ===

    fn reset(&mut self) {
        let mut deck = generate_deck(&mut self.ids);
        self.deck_rng.shuffle(&mut deck);
        self.install(deck);
        self.selection = Selection::Idle;
        self.score = 0;
        debug!(cards = self.cards.len(), "new game");
    }

    fn tap(&mut self, id: CardId) -> SelectOutcome {
        if !self.is_on_table(id) {
            trace!(%id, "ignoring select of a card not on the table");
            return SelectOutcome::Ignored;
        }

        if let Some(outcome) = self.resolve_pending() {
            if outcome == TrioOutcome::Matched && self.config.refill_after_match {
                self.deal_batch(self.deal_size());
            }
            if !self.is_on_table(id) {
                return SelectOutcome::Cleared;
            }
        }

        match self.selection.toggle(id) {
            Toggle::Added => {
                self.set_status(id, CardStatus::Selected);
                SelectOutcome::Selected
            }
            Toggle::Removed => {
                self.set_status(id, CardStatus::Normal);
                SelectOutcome::Deselected
            }
            Toggle::Completed(trio) => self.judge(trio),
        }
    }

    fn judge(&mut self, trio: [CardId; 3]) -> SelectOutcome {
        let matched = {
            let cards: SmallVec<[&Card; 3]> =
                trio.iter().filter_map(|&id| self.card_ref(id)).collect();
            is_set_cards(&cards)
        };

        let scoring = self.config.scoring;
        let (outcome, status, delta) = if matched {
            (TrioOutcome::Matched, CardStatus::Matched, scoring.match_bonus)
        } else {
            (
                TrioOutcome::Mismatched,
                CardStatus::Mismatched,
                -scoring.mismatch_penalty,
            )
        };

        for id in trio {
            self.set_status(id, status);
        }
        self.score += delta;
        self.selection.complete(trio, outcome);
        debug!(?trio, ?outcome, delta, score = self.score, "trio judged");

        match outcome {
            TrioOutcome::Matched => SelectOutcome::Matched(trio),
            TrioOutcome::Mismatched => SelectOutcome::Mismatched(trio),
        }
    }

    /// Matched cards leave the table, mismatched cards go back to normal.
    fn resolve_pending(&mut self) -> Option<TrioOutcome> {
        let (trio, outcome) = self.selection.take_pending()?;
        let status = match outcome {
            TrioOutcome::Matched => CardStatus::Removed,
            TrioOutcome::Mismatched => CardStatus::Normal,
        };
        for id in trio {
            self.set_status(id, status);
        }
        debug!(?trio, ?outcome, "resolved pending trio");
        Some(outcome)
    }

    fn deal_size(&self) -> usize {
        if self.dealt_count() == 0 {
            self.config.initial_deal
        } else {
            self.config.subsequent_deal
        }
    }

    fn deal_batch(&mut self, count: usize) -> usize {
        let next: Vec<usize> = self
            .cards
            .iter()
            .enumerate()
            .filter(|(_, card)| card.status() == CardStatus::InDeck)
            .map(|(index, _)| index)
            .take(count)
            .collect();

        for &index in &next {
            if let Some(card) = self.cards.get_mut(index) {
                card.set_status(CardStatus::Normal);
            }
        }

        debug!(dealt = next.len(), remaining = self.deck_count(), "dealt cards");
        next.len()
    }

    fn find_hint(&mut self) -> Option<CardId> {
        let (selected, mut pool) =
            completion_inputs(&self.cards, &self.positions, self.selection.building());
        self.hint_rng.shuffle(&mut pool);

        trace!(selected = selected.len(), pool = pool.len(), "searching for hint");
        find_completion(&selected, &pool).map(|card| card.id())
    }

    // === Helpers ===

    fn install(&mut self, cards: Vec<Card>) {
        self.positions = cards
            .iter()
            .enumerate()
            .map(|(index, card)| (card.id(), index))
            .collect();
        self.cards = cards.into_iter().collect();
    }

    fn card_ref(&self, id: CardId) -> Option<&Card> {
        self.positions.get(&id).and_then(|&i| self.cards.get(i))
    }

    fn is_on_table(&self, id: CardId) -> bool {
        self.card_ref(id).is_some_and(Card::is_dealt)
    }

    fn set_status(&mut self, id: CardId, status: CardStatus) {
        if let Some(&index) = self.positions.get(&id) {
            if let Some(card) = self.cards.get_mut(index) {
                card.set_status(status);
            }
        }
    }

    fn count_where(&self, pred: impl Fn(CardStatus) -> bool) -> usize {
        self.cards.iter().filter(|c| pred(c.status())).count()
    }

    fn expected_highlight(&self, id: CardId) -> Option<CardStatus> {
        match &self.selection {
            Selection::Idle => None,
            Selection::Partial(ids) => ids.contains(&id).then_some(CardStatus::Selected),
            Selection::Resolved { trio, outcome } => trio.contains(&id).then_some(match outcome {
                TrioOutcome::Matched => CardStatus::Matched,
                TrioOutcome::Mismatched => CardStatus::Mismatched,
            }),
        }
    }

    fn record(&mut self, intent: Intent) {
        let sequence = u64::try_from(self.history.len()).unwrap_or(u64::MAX);
        self.history
            .push_back(IntentRecord::new(intent, sequence, self.score));
        debug_assert_eq!(self.check_invariants(), Ok(()));
    }
}

/// The cards being built into a trio, and the table cards that may join
/// them.
fn completion_inputs<'a>(
    cards: &'a Vector<Card>,
    positions: &FxHashMap<CardId, usize>,
    building: &[CardId],
) -> (SmallVec<[&'a Card; 2]>, Vec<&'a Card>) {
    let selected = building
        .iter()
        .filter_map(|id| positions.get(id).and_then(|&i| cards.get(i)))
        .collect();
    let pool = cards
        .iter()
        .filter(|c| matches!(c.status(), CardStatus::Normal | CardStatus::Mismatched))
        .collect();
    (selected, pool)
}
