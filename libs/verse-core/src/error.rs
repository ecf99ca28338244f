//! Error types for verse-core.

use thiserror::Error;

use crate::builder::RowId;
use crate::types::CardId;

/// Errors raised by the matching game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("verse set has no entries")]
    EmptySet,

    #[error("time limit must be at least one second")]
    NoTimeLimit,

    #[error("no card {0} on the board")]
    UnknownCard(CardId),

    #[error("card {0} is already solved")]
    CardSolved(CardId),

    #[error("card {0} is locked")]
    CardLocked(CardId),

    #[error("waiting for the mismatched pair to be turned back")]
    Busy,

    #[error("game is over")]
    GameOver,
}

/// Errors raised by the flashcard carousel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CarouselError {
    #[error("verse set has no entries")]
    EmptySet,
}

/// Errors raised by the set builder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuilderError {
    #[error("no verse row {0}")]
    UnknownRow(RowId),

    #[error("verse row {0} has no suggestion")]
    NoSuggestion(RowId),
}
