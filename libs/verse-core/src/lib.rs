//! Core state for the verse study client.
//!
//! Provides:
//! - Matching game (pair each reference with its verse against the clock)
//! - Flashcard carousel and favorite button state
//! - Set builder rows with ordered verse lookups
//! - Shared types (VerseEntry, Card, FavoriteStatus, etc.)

pub mod builder;
pub mod carousel;
pub mod error;
pub mod game;
pub mod reference;
pub mod types;

pub use builder::{LookupOutcome, LookupRequest, RowId, SetBuilder, SetDraft, VerseRow};
pub use carousel::{ButtonStyle, Carousel, CarouselAction, FavoriteButton, Key, Swipe};
pub use error::{BuilderError, CarouselError, GameError};
pub use game::{CardState, GameStatus, MatchGame, TickOutcome, ToggleOutcome, MAX_PAIRS};
pub use types::{
    Card, CardId, Face, FavoriteStatus, PairId, SetId, VerseEntry, VerseLookup, VerseSet,
};
