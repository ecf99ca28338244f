//! Core types shared by the game, carousel and set builder.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-side identifier of a verse set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SetId(pub i64);

impl fmt::Display for SetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Links the reference card and the verse card of one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PairId(pub usize);

/// Position of a card on the game board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub usize);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A verse and its reference, as stored in a set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseEntry {
    pub reference: String,
    pub verse: String,
}

impl VerseEntry {
    pub fn new(reference: impl Into<String>, verse: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            verse: verse.into(),
        }
    }
}

/// Body of `GET /api/sets/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerseSet {
    pub cards: Vec<VerseEntry>,
}

/// Which half of a verse entry a card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Face {
    Reference,
    Verse,
}

/// One tile of the matching game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub pair_id: PairId,
    pub face: Face,
    pub text: String,
}

/// Result of toggling a set's favorite flag on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FavoriteStatus {
    Added,
    Removed,
}

impl FavoriteStatus {
    /// Interpret the `message` field of the favorite response.
    /// Only the exact string `"Added"` counts as added.
    pub fn from_message(message: &str) -> Self {
        if message == "Added" {
            Self::Added
        } else {
            Self::Removed
        }
    }
}

/// Verse text returned by a reference lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseLookup {
    /// Canonical form of the reference, as the lookup service spells it.
    pub reference: String,
    pub verse: String,
}
