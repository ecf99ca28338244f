//! Matching game controller.

use serde::Serialize;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, Instant};
use verse_core::game::{CardState, GameStatus, MatchGame, TickOutcome, ToggleOutcome};
use verse_core::types::{Card, CardId};

use super::{emit, CommandError};
use crate::api::ApiClient;
use crate::config::GameSettings;

const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    Toggle(CardId),
    Replay,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// A freshly dealt board.
    Board {
        cards: Vec<Card>,
        time_limit_secs: u32,
    },
    Checked {
        card: CardId,
    },
    Unchecked {
        card: CardId,
    },
    Matched {
        first: CardId,
        second: CardId,
        progress: u8,
    },
    Mismatched {
        first: CardId,
        second: CardId,
    },
    /// A mismatched pair was turned face down again.
    TurnedBack {
        first: CardId,
        second: CardId,
    },
    Tick {
        remaining_secs: u32,
    },
    Won {
        remaining_secs: u32,
    },
    TimedOut {
        progress: u8,
        locked: Vec<CardId>,
    },
    /// The input was not accepted (solved card, board busy, game over).
    Rejected {
        reason: String,
    },
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    pub status: GameStatus,
    pub progress: u8,
    pub remaining_secs: u32,
}

/// Fetch a set and play it until the player quits.
pub async fn play(
    api: &ApiClient,
    settings: &GameSettings,
    input: mpsc::Receiver<GameInput>,
    events: mpsc::Sender<GameEvent>,
) -> Result<GameSummary, CommandError> {
    let set = api.get_set(settings.set_id).await?;
    tracing::info!(set_id = %settings.set_id, verses = set.cards.len(), "starting matching game");

    let game = MatchGame::new(set.cards, settings.time_limit_secs, &mut rand::rng())?;
    Ok(GameSession::new(game, settings.mismatch_delay)
        .run(input, events)
        .await)
}

/// A running game plus the timers around it.
pub struct GameSession {
    game: MatchGame,
    mismatch_delay: Duration,
}

impl GameSession {
    pub fn new(game: MatchGame, mismatch_delay: Duration) -> Self {
        Self {
            game,
            mismatch_delay,
        }
    }

    /// Run the event loop until the input closes or the player quits.
    pub async fn run(
        mut self,
        mut input: mpsc::Receiver<GameInput>,
        events: mpsc::Sender<GameEvent>,
    ) -> GameSummary {
        let mut clock = time::interval_at(Instant::now() + TICK, TICK);
        let mut turn_back_at: Option<Instant> = None;
        let mut batch = vec![self.board()];

        'session: loop {
            for event in batch.drain(..) {
                if !emit(&events, event).await {
                    break 'session;
                }
            }

            let playing = self.game.status() == GameStatus::Playing;
            batch = tokio::select! {
                _ = clock.tick(), if playing => match self.game.tick() {
                    TickOutcome::Running { remaining_secs } => vec![GameEvent::Tick { remaining_secs }],
                    TickOutcome::TimedOut => {
                        turn_back_at = None;
                        vec![self.timed_out()]
                    }
                    TickOutcome::Stopped => Vec::new(),
                },
                _ = time::sleep_until(turn_back_at.unwrap_or_else(Instant::now)), if turn_back_at.is_some() => {
                    turn_back_at = None;
                    self.game
                        .resolve_mismatch()
                        .map(|(first, second)| GameEvent::TurnedBack { first, second })
                        .into_iter()
                        .collect()
                }
                msg = input.recv() => match msg {
                    None | Some(GameInput::Quit) => break 'session,
                    Some(GameInput::Replay) => {
                        self.game.replay(&mut rand::rng());
                        clock.reset();
                        turn_back_at = None;
                        tracing::debug!("board dealt again");
                        vec![self.board()]
                    }
                    Some(GameInput::Toggle(card)) => {
                        let (out, mismatch) = self.on_toggle(card);
                        if mismatch {
                            turn_back_at = Some(Instant::now() + self.mismatch_delay);
                        }
                        out
                    }
                },
            };
        }

        GameSummary {
            status: self.game.status(),
            progress: self.game.progress_percent(),
            remaining_secs: self.game.remaining_secs(),
        }
    }

    fn board(&self) -> GameEvent {
        GameEvent::Board {
            cards: self.game.cards().to_vec(),
            time_limit_secs: self.game.time_limit_secs(),
        }
    }

    fn timed_out(&self) -> GameEvent {
        let locked: Vec<CardId> = self
            .game
            .cards()
            .iter()
            .map(|c| c.id)
            .filter(|id| self.game.state(*id) == Some(CardState::Locked))
            .collect();
        tracing::info!(progress = self.game.progress_percent(), "time is up");
        GameEvent::TimedOut {
            progress: self.game.progress_percent(),
            locked,
        }
    }

    /// Returns the events to report and whether a mismatch is now showing.
    fn on_toggle(&mut self, card: CardId) -> (Vec<GameEvent>, bool) {
        match self.game.toggle(card) {
            Ok(ToggleOutcome::Checked { card }) => (vec![GameEvent::Checked { card }], false),
            Ok(ToggleOutcome::Unchecked { card }) => (vec![GameEvent::Unchecked { card }], false),
            Ok(ToggleOutcome::Matched { first, second, won }) => {
                let mut out = vec![GameEvent::Matched {
                    first,
                    second,
                    progress: self.game.progress_percent(),
                }];
                if won {
                    tracing::info!(remaining_secs = self.game.remaining_secs(), "all pairs matched");
                    out.push(GameEvent::Won {
                        remaining_secs: self.game.remaining_secs(),
                    });
                }
                (out, false)
            }
            Ok(ToggleOutcome::Mismatched { first, second }) => {
                (vec![GameEvent::Mismatched { first, second }], true)
            }
            Err(e) => {
                tracing::debug!(card = %card, error = %e, "toggle rejected");
                (
                    vec![GameEvent::Rejected {
                        reason: e.to_string(),
                    }],
                    false,
                )
            }
        }
    }
}
