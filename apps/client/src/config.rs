//! Command-line and environment configuration.

use clap::{Parser, Subcommand};
use std::time::Duration;
use verse_core::types::SetId;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 60;
pub const DEFAULT_MISMATCH_DELAY_MS: u64 = 1000;
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

#[derive(Parser, Debug)]
#[command(name = "verse-study")]
#[command(version, about = "Study Bible verse sets from the terminal", long_about = None)]
pub struct Args {
    /// Base URL of the verse study server
    #[arg(long, env = "VERSE_STUDY_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Match each reference with its verse before the clock runs out
    Play {
        set_id: i64,
        /// Seconds on the clock
        #[arg(long, default_value_t = DEFAULT_TIME_LIMIT_SECS)]
        time_limit: u32,
        /// How long a mismatched pair stays visible
        #[arg(long, default_value_t = DEFAULT_MISMATCH_DELAY_MS)]
        mismatch_delay_ms: u64,
    },
    /// Flip through a set as flashcards
    Review {
        set_id: i64,
        /// The set is already one of your favorites
        #[arg(long)]
        favorited: bool,
    },
    /// Collect references for a new set, looking up each verse as you type
    Build {
        /// Quiet period after typing before a reference is looked up
        #[arg(long, default_value_t = DEFAULT_DEBOUNCE_MS)]
        debounce_ms: u64,
        /// Leave verse numbers out of looked-up text
        #[arg(long)]
        no_verse_numbers: bool,
    },
}

/// Matching game settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSettings {
    pub set_id: SetId,
    pub time_limit_secs: u32,
    pub mismatch_delay: Duration,
}

impl GameSettings {
    pub fn new(set_id: SetId) -> Self {
        Self {
            set_id,
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            mismatch_delay: Duration::from_millis(DEFAULT_MISMATCH_DELAY_MS),
        }
    }
}

/// Set builder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuilderSettings {
    pub debounce: Duration,
    pub get_verse_num: bool,
}

impl Default for BuilderSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            get_verse_num: true,
        }
    }
}
