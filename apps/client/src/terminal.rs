//! Line-oriented terminal front end: parses typed commands into controller
//! inputs and renders controller events as text.

use verse_core::builder::RowId;
use verse_core::carousel::{Key, Swipe};
use verse_core::types::{CardId, Face};

use crate::commands::{BuilderEvent, BuilderInput, CarouselEvent, CarouselInput, GameEvent, GameInput};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("expected a number, got {0:?}")]
    NotANumber(String),

    #[error("missing argument for {0}")]
    MissingArgument(&'static str),
}

pub const GAME_HELP: &str = "Type a card number to turn it over, `r` to replay, `q` to quit.";
pub const CAROUSEL_HELP: &str =
    "Keys: up/down/space flip, left/right move, click flips, swipe-left/swipe-right, fav toggles favorite, q quits.";
pub const BUILDER_HELP: &str =
    "Commands: add, del <row>, ref <row> <reference>, accept <row>, done, q.";

/// Board numbers are shown starting at 1.
pub fn parse_game_input(line: &str) -> Result<GameInput, InputError> {
    match line.trim() {
        "q" | "quit" => Ok(GameInput::Quit),
        "r" | "replay" => Ok(GameInput::Replay),
        other => match other.parse::<usize>() {
            Ok(num) if num >= 1 => Ok(GameInput::Toggle(CardId(num - 1))),
            _ => Err(InputError::NotANumber(other.to_string())),
        },
    }
}

pub fn parse_carousel_input(line: &str) -> Result<CarouselInput, InputError> {
    let input = match line.trim().to_lowercase().as_str() {
        "q" | "quit" => CarouselInput::Quit,
        "up" => CarouselInput::Key(Key::ArrowUp),
        "down" => CarouselInput::Key(Key::ArrowDown),
        "" | "space" => CarouselInput::Key(Key::Space),
        "left" | "p" => CarouselInput::Key(Key::ArrowLeft),
        "right" | "n" => CarouselInput::Key(Key::ArrowRight),
        "click" => CarouselInput::Click,
        "swipe-left" => CarouselInput::Swipe(Swipe::Left),
        "swipe-right" => CarouselInput::Swipe(Swipe::Right),
        "fav" | "favorite" => CarouselInput::ToggleFavorite,
        other => return Err(InputError::Unknown(other.to_string())),
    };
    Ok(input)
}

pub fn parse_builder_input(line: &str) -> Result<BuilderInput, InputError> {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "q" | "quit" => Ok(BuilderInput::Quit),
        "add" => Ok(BuilderInput::AddRow),
        "done" => Ok(BuilderInput::Submit),
        "del" => Ok(BuilderInput::RemoveRow(parse_row(rest, "del")?)),
        "accept" => Ok(BuilderInput::AcceptSuggestion(parse_row(rest, "accept")?)),
        "ref" => {
            let (row, text) = match rest.split_once(char::is_whitespace) {
                Some((row, text)) => (row, text.trim()),
                None => (rest, ""),
            };
            Ok(BuilderInput::Reference(parse_row(row, "ref")?, text.to_string()))
        }
        other => Err(InputError::Unknown(other.to_string())),
    }
}

fn parse_row(arg: &str, command: &'static str) -> Result<RowId, InputError> {
    if arg.is_empty() {
        return Err(InputError::MissingArgument(command));
    }
    arg.parse::<u64>()
        .map(RowId)
        .map_err(|_| InputError::NotANumber(arg.to_string()))
}

fn card_label(card: CardId) -> usize {
    card.0 + 1
}

pub fn render_game_event(event: &GameEvent) -> String {
    match event {
        GameEvent::Board {
            cards,
            time_limit_secs,
        } => {
            let mut out = format!("==========> {} cards, {}s on the clock <==========", cards.len(), time_limit_secs);
            for card in cards {
                let kind = match card.face {
                    Face::Reference => "ref  ",
                    Face::Verse => "verse",
                };
                out.push_str(&format!("\n{:>3}. [{}] {}", card_label(card.id), kind, card.text));
            }
            out
        }
        GameEvent::Checked { card } => format!("Card {} turned over.", card_label(*card)),
        GameEvent::Unchecked { card } => format!("Card {} turned back.", card_label(*card)),
        GameEvent::Matched {
            first,
            second,
            progress,
        } => format!(
            "Match! Cards {} and {} solved. Progress: {}%",
            card_label(*first),
            card_label(*second),
            progress
        ),
        GameEvent::Mismatched { first, second } => format!(
            "No match between cards {} and {}.",
            card_label(*first),
            card_label(*second)
        ),
        GameEvent::TurnedBack { first, second } => format!(
            "Cards {} and {} turned back over.",
            card_label(*first),
            card_label(*second)
        ),
        // Only announce round tens and the final countdown.
        GameEvent::Tick { remaining_secs } if remaining_secs % 10 == 0 || *remaining_secs <= 5 => {
            format!("{}s left", remaining_secs)
        }
        GameEvent::Tick { .. } => String::new(),
        GameEvent::Won { remaining_secs } => {
            format!("You matched every verse with {}s to spare! (r to replay)", remaining_secs)
        }
        GameEvent::TimedOut { progress, locked } => format!(
            "Time's up! {}% solved, {} cards left unmatched. (r to replay)",
            progress,
            locked.len()
        ),
        GameEvent::Rejected { reason } => format!("Not allowed: {}", reason),
    }
}

pub fn render_carousel_event(event: &CarouselEvent) -> String {
    match event {
        CarouselEvent::Card {
            index,
            total,
            text,
            flipped,
        } => format!(
            "[{}/{}]{} {}",
            index + 1,
            total,
            if *flipped { " (flipped)" } else { "" },
            text
        ),
        CarouselEvent::Favorite { label, .. } => format!("<{}>", label),
        CarouselEvent::FavoriteFailed { reason } => format!("Could not update favorites: {}", reason),
    }
}

pub fn render_builder_event(event: &BuilderEvent) -> String {
    match event {
        BuilderEvent::RowAdded { row } => format!("Row {} added.", row),
        BuilderEvent::RowRemoved { row } => format!("Row {} removed.", row),
        BuilderEvent::Verse {
            row,
            verse,
            suggestion,
        } => {
            let mut out = format!("Row {}: {}", row, verse);
            if let Some(suggestion) = suggestion {
                out.push_str(&format!("\n  Did you mean: {} (accept {})", suggestion, row));
            }
            out
        }
        BuilderEvent::Cleared { row } => format!("Row {} cleared.", row),
        BuilderEvent::SuggestionAccepted { row, reference } => {
            format!("Row {} reference set to {}.", row, reference)
        }
        BuilderEvent::LookupFailed { row, reason } => format!("Row {}: lookup failed ({})", row, reason),
        BuilderEvent::Rejected { reason } => format!("Not allowed: {}", reason),
        BuilderEvent::Submitted { draft } => format!("Collected {} references.", draft.refs.len()),
    }
}
