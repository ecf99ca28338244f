//! Flashcard carousel: one verse card at a time, flipped between
//! reference and verse text.

use serde::{Deserialize, Serialize};

use crate::error::CarouselError;
use crate::types::{FavoriteStatus, VerseEntry};

/// Keys the carousel reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Other,
}

/// Horizontal swipe direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Swipe {
    Left,
    Right,
}

/// Action taken in response to an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarouselAction {
    Flip,
    Next,
    Prev,
}

/// A deck of verse cards with a single active slide.
#[derive(Debug, Clone)]
pub struct Carousel {
    entries: Vec<VerseEntry>,
    flipped: Vec<bool>,
    active: usize,
}

// Never empty: `new` rejects an empty set.
#[allow(clippy::len_without_is_empty)]
impl Carousel {
    /// Build a carousel with the first card active.
    pub fn new(entries: Vec<VerseEntry>) -> Result<Self, CarouselError> {
        if entries.is_empty() {
            return Err(CarouselError::EmptySet);
        }
        Ok(Self {
            flipped: vec![false; entries.len()],
            entries,
            active: 0,
        })
    }

    /// Toggle the flipped state of the active card. Returns the new state.
    pub fn flip(&mut self) -> bool {
        let flipped = &mut self.flipped[self.active];
        *flipped = !*flipped;
        *flipped
    }

    /// Move to the next card, wrapping to the first.
    pub fn next(&mut self) -> usize {
        self.active = (self.active + 1) % self.entries.len();
        self.active
    }

    /// Move to the previous card, wrapping to the last.
    pub fn prev(&mut self) -> usize {
        self.active = (self.active + self.entries.len() - 1) % self.entries.len();
        self.active
    }

    /// Apply a key press. Keys the carousel does not use return `None`.
    pub fn handle_key(&mut self, key: Key) -> Option<CarouselAction> {
        let action = match key {
            Key::ArrowUp | Key::ArrowDown | Key::Space => CarouselAction::Flip,
            Key::ArrowRight => CarouselAction::Next,
            Key::ArrowLeft => CarouselAction::Prev,
            Key::Other => return None,
        };
        self.apply(action);
        Some(action)
    }

    /// Apply a swipe gesture. Swiping left brings in the next card.
    pub fn handle_swipe(&mut self, swipe: Swipe) -> CarouselAction {
        let action = match swipe {
            Swipe::Left => CarouselAction::Next,
            Swipe::Right => CarouselAction::Prev,
        };
        self.apply(action);
        action
    }

    fn apply(&mut self, action: CarouselAction) {
        match action {
            CarouselAction::Flip => {
                self.flip();
            }
            CarouselAction::Next => {
                self.next();
            }
            CarouselAction::Prev => {
                self.prev();
            }
        }
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> &VerseEntry {
        &self.entries[self.active]
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped[self.active]
    }

    /// Text currently showing on the active card: the reference on the
    /// front, the verse once flipped.
    pub fn visible_text(&self) -> &str {
        let entry = self.active();
        if self.is_flipped() {
            &entry.verse
        } else {
            &entry.reference
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Visual style of the favorite button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonStyle {
    Success,
    Warning,
}

/// Favorite toggle button of a set page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FavoriteButton {
    favorited: bool,
}

impl FavoriteButton {
    pub const FAVORITE_LABEL: &'static str = "Favorite this set";
    pub const UNFAVORITE_LABEL: &'static str = "Unfavorite this set";

    pub fn new(favorited: bool) -> Self {
        Self { favorited }
    }

    /// Update from the server's report of the toggle.
    pub fn apply(&mut self, status: FavoriteStatus) {
        self.favorited = status == FavoriteStatus::Added;
    }

    pub fn is_favorited(&self) -> bool {
        self.favorited
    }

    pub fn label(&self) -> &'static str {
        if self.favorited {
            Self::UNFAVORITE_LABEL
        } else {
            Self::FAVORITE_LABEL
        }
    }

    pub fn style(&self) -> ButtonStyle {
        if self.favorited {
            ButtonStyle::Warning
        } else {
            ButtonStyle::Success
        }
    }
}
