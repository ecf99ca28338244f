//! Controllers that connect user input, timers and the REST API to the
//! core state machines.
//!
//! Each controller reads inputs from an `mpsc` channel and reports what
//! changed as events on another, so any front end can drive it.

pub mod builder;
pub mod carousel;
pub mod game;

use tokio::sync::mpsc;
use verse_core::error::{CarouselError, GameError};

use crate::api::ApiError;

pub use builder::{build, BuilderEvent, BuilderInput};
pub use carousel::{review, CarouselEvent, CarouselInput};
pub use game::{play, GameEvent, GameInput, GameSession, GameSummary};

/// Errors that end a controller session.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Game(#[from] GameError),

    #[error(transparent)]
    Carousel(#[from] CarouselError),
}

/// Send an event; `false` once the front end has gone away.
async fn emit<E>(events: &mpsc::Sender<E>, event: E) -> bool {
    events.send(event).await.is_ok()
}
