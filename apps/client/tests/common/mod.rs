//! Common test utilities for client integration tests.
//!
//! Provides an in-process stand-in for the verse study REST API:
//! - `GET /api/sets/:id`
//! - `POST /api/sets/:id/favorite`
//! - `GET /api/verse?reference=&get_verse_num=`
//!
//! The stub records every lookup it serves so tests can check debouncing.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;

use verse_core::types::VerseEntry;
use verse_study::api::ApiClient;

/// Set whose favorite endpoint always fails.
pub const BROKEN_FAVORITE_SET: i64 = 2;

#[derive(Default)]
struct StubInner {
    sets: HashMap<i64, Vec<VerseEntry>>,
    favorites: HashSet<i64>,
    canonical: HashMap<String, String>,
    verses: HashMap<String, String>,
    delays: HashMap<String, Duration>,
    lookups: Vec<String>,
    flat_lookups: bool,
}

/// Shared, inspectable state of the stub server.
#[derive(Clone, Default)]
pub struct StubState {
    inner: Arc<Mutex<StubInner>>,
}

impl StubState {
    pub fn add_set(&self, id: i64, entries: Vec<VerseEntry>) {
        self.inner.lock().unwrap().sets.insert(id, entries);
    }

    /// Register a reference the lookup endpoint knows about.
    pub fn add_verse(&self, typed: &str, canonical: &str, verse: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.canonical.insert(typed.to_string(), canonical.to_string());
        inner.verses.insert(typed.to_string(), verse.to_string());
    }

    /// Make lookups for `reference` take `delay` before answering.
    pub fn delay_lookup(&self, reference: &str, delay: Duration) {
        self.inner
            .lock()
            .unwrap()
            .delays
            .insert(reference.to_string(), delay);
    }

    pub fn use_flat_lookups(&self) {
        self.inner.lock().unwrap().flat_lookups = true;
    }

    pub fn lookups(&self) -> Vec<String> {
        self.inner.lock().unwrap().lookups.clone()
    }

    pub fn is_favorite(&self, id: i64) -> bool {
        self.inner.lock().unwrap().favorites.contains(&id)
    }
}

/// Stub server bound to an ephemeral local port.
pub struct StubServer {
    pub state: StubState,
    pub base_url: String,
}

impl StubServer {
    pub async fn start() -> Self {
        let state = StubState::default();
        state.add_set(1, sample_entries(3));
        state.add_set(BROKEN_FAVORITE_SET, sample_entries(2));
        state.add_set(8, sample_entries(8));

        let app = Router::new()
            .route("/api/sets/:id", get(get_set))
            .route("/api/sets/:id/favorite", post(toggle_favorite))
            .route("/api/verse", get(lookup_verse))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind stub server");
        let addr = listener.local_addr().expect("stub server address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub server failed");
        });

        Self {
            state,
            base_url: format!("http://{}", addr),
        }
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.base_url.as_str())
    }
}

/// `n` distinct entries: "Psalm i:1" / "Verse text i".
pub fn sample_entries(n: usize) -> Vec<VerseEntry> {
    (1..=n)
        .map(|i| VerseEntry::new(format!("Psalm {}:1", i), format!("Verse text {}", i)))
        .collect()
}

async fn get_set(State(state): State<StubState>, Path(id): Path<i64>) -> Response {
    let entries = state.inner.lock().unwrap().sets.get(&id).cloned();
    match entries {
        Some(cards) => Json(json!({ "cards": cards })).into_response(),
        None => (StatusCode::NOT_FOUND, "set not found").into_response(),
    }
}

async fn toggle_favorite(State(state): State<StubState>, Path(id): Path<i64>) -> Response {
    if id == BROKEN_FAVORITE_SET {
        return (StatusCode::INTERNAL_SERVER_ERROR, "favorites unavailable").into_response();
    }
    let mut inner = state.inner.lock().unwrap();
    let message = if inner.favorites.remove(&id) {
        "Removed"
    } else {
        inner.favorites.insert(id);
        "Added"
    };
    Json(json!({ "message": message })).into_response()
}

#[derive(Deserialize)]
struct LookupParams {
    reference: String,
    get_verse_num: bool,
}

async fn lookup_verse(State(state): State<StubState>, Query(params): Query<LookupParams>) -> Response {
    let (delay, canonical, verse, flat) = {
        let mut inner = state.inner.lock().unwrap();
        inner.lookups.push(params.reference.clone());
        (
            inner.delays.get(&params.reference).copied(),
            inner.canonical.get(&params.reference).cloned(),
            inner.verses.get(&params.reference).cloned(),
            inner.flat_lookups,
        )
    };

    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let passages = match verse {
        Some(verse) if params.get_verse_num => format!("[1] {}", verse),
        Some(verse) => verse,
        None => "Error: Passage not found".to_string(),
    };
    let reference = canonical.unwrap_or(params.reference);

    if flat {
        Json(json!({ "verse": passages })).into_response()
    } else {
        Json(json!({ "info": { "passages": passages, "reference": reference } })).into_response()
    }
}
