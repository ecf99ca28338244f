pub mod api;
pub mod commands;
pub mod config;
pub mod terminal;

use clap::Parser;
use std::fmt::Debug;
use std::io::BufRead;
use std::thread;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use verse_core::types::SetId;

use crate::api::ApiClient;
use crate::config::{Args, BuilderSettings, Command, GameSettings};
use crate::terminal::InputError;

const CHANNEL_CAPACITY: usize = 32;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let api = ApiClient::new(args.base_url.as_str());
    tracing::info!(base_url = %api.base_url(), "using verse study server");

    match args.command {
        Command::Play {
            set_id,
            time_limit,
            mismatch_delay_ms,
        } => {
            let settings = GameSettings {
                set_id: SetId(set_id),
                time_limit_secs: time_limit,
                mismatch_delay: std::time::Duration::from_millis(mismatch_delay_ms),
            };
            println!("{}", terminal::GAME_HELP);
            let input = spawn_line_reader(terminal::parse_game_input);
            let (events, printer) = spawn_printer(terminal::render_game_event);
            let summary = commands::play(&api, &settings, input, events).await;
            printer.await?;
            let summary = summary?;
            tracing::info!(status = ?summary.status, progress = summary.progress, "game finished");
        }
        Command::Review { set_id, favorited } => {
            println!("{}", terminal::CAROUSEL_HELP);
            let input = spawn_line_reader(terminal::parse_carousel_input);
            let (events, printer) = spawn_printer(terminal::render_carousel_event);
            let button = commands::review(&api, SetId(set_id), favorited, input, events).await;
            printer.await?;
            tracing::info!(favorited = button?.is_favorited(), "review finished");
        }
        Command::Build {
            debounce_ms,
            no_verse_numbers,
        } => {
            let settings = BuilderSettings {
                debounce: std::time::Duration::from_millis(debounce_ms),
                get_verse_num: !no_verse_numbers,
            };
            println!("{}", terminal::BUILDER_HELP);
            let input = spawn_line_reader(terminal::parse_builder_input);
            let (events, printer) = spawn_printer(terminal::render_builder_event);
            let draft = commands::build(&api, &settings, input, events).await;
            printer.await?;
            if let Some(draft) = draft? {
                println!("{}", serde_json::to_string_pretty(&draft)?);
            }
        }
    }

    Ok(())
}

/// Read stdin on a plain thread and forward parsed lines to the controller.
///
/// A blocking thread keeps an unanswered prompt from holding up runtime
/// shutdown.
fn spawn_line_reader<I, F>(parse: F) -> mpsc::Receiver<I>
where
    I: Debug + Send + 'static,
    F: Fn(&str) -> Result<I, InputError> + Send + 'static,
{
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match parse(&line) {
                Ok(input) => {
                    tracing::trace!(?input, "input");
                    if tx.blocking_send(input).is_err() {
                        break;
                    }
                }
                Err(e) => println!("{}", e),
            }
        }
    });
    rx
}

fn spawn_printer<E, F>(render: F) -> (mpsc::Sender<E>, tokio::task::JoinHandle<()>)
where
    E: Send + 'static,
    F: Fn(&E) -> String + Send + 'static,
{
    let (tx, mut rx) = mpsc::channel::<E>(CHANNEL_CAPACITY);
    let handle = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let text = render(&event);
            if !text.is_empty() {
                println!("{}", text);
            }
        }
    });
    (tx, handle)
}
