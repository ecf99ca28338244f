//! Matching game: pair every reference with its verse before time runs out.
//!
//! The game itself is clock-agnostic. Callers drive the countdown with
//! [`MatchGame::tick`] once per second and turn a mismatched pair back over
//! with [`MatchGame::resolve_mismatch`] after their chosen delay.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::types::{Card, CardId, Face, PairId, VerseEntry};

/// Maximum number of verse entries placed on one board.
pub const MAX_PAIRS: usize = 6;

/// Visual/input state of a single card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardState {
    Hidden,
    Checked,
    Solved,
    /// Unsolved when the clock ran out; no longer accepts input.
    Locked,
}

/// Overall game status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Playing,
    Won,
    TimedOut,
}

/// What happened when a card was toggled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToggleOutcome {
    /// First card of a pair turned over.
    Checked { card: CardId },
    /// The open card was turned back by the player.
    Unchecked { card: CardId },
    Matched {
        first: CardId,
        second: CardId,
        won: bool,
    },
    /// Both cards stay checked until [`MatchGame::resolve_mismatch`].
    Mismatched { first: CardId, second: CardId },
}

/// Result of one countdown step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TickOutcome {
    Running { remaining_secs: u32 },
    TimedOut,
    /// The game was already over; the tick had no effect.
    Stopped,
}

/// State of one matching game session.
#[derive(Debug, Clone)]
pub struct MatchGame {
    pool: Vec<VerseEntry>,
    cards: Vec<Card>,
    states: Vec<CardState>,
    open: Option<CardId>,
    pending: Option<(CardId, CardId)>,
    time_limit_secs: u32,
    remaining_secs: u32,
    status: GameStatus,
}

impl MatchGame {
    /// Deal a new board from `entries`, picking at most [`MAX_PAIRS`] of them.
    pub fn new<R: Rng + ?Sized>(
        entries: Vec<VerseEntry>,
        time_limit_secs: u32,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        if entries.is_empty() {
            return Err(GameError::EmptySet);
        }
        if time_limit_secs == 0 {
            return Err(GameError::NoTimeLimit);
        }

        let mut game = Self {
            pool: entries,
            cards: Vec::new(),
            states: Vec::new(),
            open: None,
            pending: None,
            time_limit_secs,
            remaining_secs: time_limit_secs,
            status: GameStatus::Playing,
        };
        game.deal(rng);
        Ok(game)
    }

    /// Start over with a fresh shuffle and a full clock.
    pub fn replay<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.deal(rng);
    }

    fn deal<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut picked: Vec<&VerseEntry> = self.pool.iter().collect();
        picked.shuffle(rng);
        picked.truncate(MAX_PAIRS);

        let mut cards: Vec<Card> = Vec::with_capacity(picked.len() * 2);
        for (pair, entry) in picked.into_iter().enumerate() {
            cards.push(Card {
                id: CardId(0),
                pair_id: PairId(pair),
                face: Face::Reference,
                text: entry.reference.clone(),
            });
            cards.push(Card {
                id: CardId(0),
                pair_id: PairId(pair),
                face: Face::Verse,
                text: entry.verse.clone(),
            });
        }
        cards.shuffle(rng);
        for (position, card) in cards.iter_mut().enumerate() {
            card.id = CardId(position);
        }

        self.states = vec![CardState::Hidden; cards.len()];
        self.cards = cards;
        self.open = None;
        self.pending = None;
        self.remaining_secs = self.time_limit_secs;
        self.status = GameStatus::Playing;
    }

    /// Check or uncheck a card.
    pub fn toggle(&mut self, card: CardId) -> Result<ToggleOutcome, GameError> {
        if self.status != GameStatus::Playing {
            return Err(GameError::GameOver);
        }
        let state = self.state(card).ok_or(GameError::UnknownCard(card))?;
        match state {
            CardState::Solved => return Err(GameError::CardSolved(card)),
            CardState::Locked => return Err(GameError::CardLocked(card)),
            _ => {}
        }
        if self.pending.is_some() {
            return Err(GameError::Busy);
        }

        if state == CardState::Checked {
            self.states[card.0] = CardState::Hidden;
            self.open = None;
            return Ok(ToggleOutcome::Unchecked { card });
        }

        self.states[card.0] = CardState::Checked;
        let Some(first) = self.open.take() else {
            self.open = Some(card);
            return Ok(ToggleOutcome::Checked { card });
        };

        if self.cards[first.0].pair_id == self.cards[card.0].pair_id {
            self.states[first.0] = CardState::Solved;
            self.states[card.0] = CardState::Solved;
            let won = self.solved_count() == self.cards.len();
            if won {
                self.status = GameStatus::Won;
            }
            Ok(ToggleOutcome::Matched {
                first,
                second: card,
                won,
            })
        } else {
            self.pending = Some((first, card));
            Ok(ToggleOutcome::Mismatched {
                first,
                second: card,
            })
        }
    }

    /// Turn a mismatched pair back over. Returns the pair, if one was pending.
    pub fn resolve_mismatch(&mut self) -> Option<(CardId, CardId)> {
        let (first, second) = self.pending.take()?;
        for card in [first, second] {
            if self.states[card.0] == CardState::Checked {
                self.states[card.0] = CardState::Hidden;
            }
        }
        Some((first, second))
    }

    /// Advance the countdown by one second.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != GameStatus::Playing {
            return TickOutcome::Stopped;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.time_out();
            TickOutcome::TimedOut
        } else {
            TickOutcome::Running {
                remaining_secs: self.remaining_secs,
            }
        }
    }

    fn time_out(&mut self) {
        self.status = GameStatus::TimedOut;
        self.open = None;
        self.pending = None;
        for state in self.states.iter_mut() {
            if *state != CardState::Solved {
                *state = CardState::Locked;
            }
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, card: CardId) -> Option<&Card> {
        self.cards.get(card.0)
    }

    pub fn state(&self, card: CardId) -> Option<CardState> {
        self.states.get(card.0).copied()
    }

    /// Whether the card still accepts input.
    pub fn is_enabled(&self, card: CardId) -> bool {
        self.status == GameStatus::Playing
            && matches!(
                self.state(card),
                Some(CardState::Hidden) | Some(CardState::Checked)
            )
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn time_limit_secs(&self) -> u32 {
        self.time_limit_secs
    }

    pub fn has_pending_mismatch(&self) -> bool {
        self.pending.is_some()
    }

    pub fn total_cards(&self) -> usize {
        self.cards.len()
    }

    pub fn solved_count(&self) -> usize {
        self.states
            .iter()
            .filter(|s| **s == CardState::Solved)
            .count()
    }

    /// Solved share of the board in whole percent, rounded down.
    pub fn progress_percent(&self) -> u8 {
        let total = self.total_cards();
        if total == 0 {
            return 0;
        }
        (self.solved_count() * 100 / total) as u8
    }
}
