//! Flashcard carousel controller.

use serde::Serialize;
use tokio::sync::mpsc;
use verse_core::carousel::{ButtonStyle, Carousel, FavoriteButton, Key, Swipe};
use verse_core::types::SetId;

use super::{emit, CommandError};
use crate::api::ApiClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselInput {
    Key(Key),
    /// Click on the card body.
    Click,
    Swipe(Swipe),
    ToggleFavorite,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CarouselEvent {
    Card {
        index: usize,
        total: usize,
        text: String,
        flipped: bool,
    },
    Favorite {
        label: &'static str,
        style: ButtonStyle,
    },
    FavoriteFailed {
        reason: String,
    },
}

/// Fetch a set and show it as flashcards until the user quits.
///
/// Returns the favorite button as it stood when the session ended.
pub async fn review(
    api: &ApiClient,
    set_id: SetId,
    favorited: bool,
    mut input: mpsc::Receiver<CarouselInput>,
    events: mpsc::Sender<CarouselEvent>,
) -> Result<FavoriteButton, CommandError> {
    let set = api.get_set(set_id).await?;
    tracing::info!(set_id = %set_id, verses = set.cards.len(), "starting flashcard review");

    let mut carousel = Carousel::new(set.cards)?;
    let mut button = FavoriteButton::new(favorited);

    if !emit(&events, favorite_event(&button)).await || !emit(&events, card_event(&carousel)).await {
        return Ok(button);
    }

    while let Some(msg) = input.recv().await {
        let event = match msg {
            CarouselInput::Quit => break,
            CarouselInput::Click => {
                carousel.flip();
                Some(card_event(&carousel))
            }
            CarouselInput::Key(key) => carousel.handle_key(key).map(|_| card_event(&carousel)),
            CarouselInput::Swipe(swipe) => {
                carousel.handle_swipe(swipe);
                Some(card_event(&carousel))
            }
            CarouselInput::ToggleFavorite => match api.toggle_favorite(set_id).await {
                Ok(status) => {
                    button.apply(status);
                    Some(favorite_event(&button))
                }
                Err(e) => {
                    tracing::warn!(set_id = %set_id, error = %e, "favorite toggle failed");
                    Some(CarouselEvent::FavoriteFailed {
                        reason: e.to_string(),
                    })
                }
            },
        };

        if let Some(event) = event {
            if !emit(&events, event).await {
                break;
            }
        }
    }

    Ok(button)
}

fn card_event(carousel: &Carousel) -> CarouselEvent {
    CarouselEvent::Card {
        index: carousel.active_index(),
        total: carousel.len(),
        text: carousel.visible_text().to_string(),
        flipped: carousel.is_flipped(),
    }
}

fn favorite_event(button: &FavoriteButton) -> CarouselEvent {
    CarouselEvent::Favorite {
        label: button.label(),
        style: button.style(),
    }
}
