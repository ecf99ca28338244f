//! REST client tests against the in-process stub server.

mod common;

use pretty_assertions::assert_eq;
use verse_core::types::{FavoriteStatus, SetId, VerseEntry};
use verse_study::api::{ApiClient, ApiError};

use common::{StubServer, BROKEN_FAVORITE_SET};

#[tokio::test]
async fn test_get_set_returns_entries() {
    let server = StubServer::start().await;
    let set = server.client().get_set(SetId(1)).await.unwrap();

    assert_eq!(set.cards.len(), 3);
    assert_eq!(set.cards[0], VerseEntry::new("Psalm 1:1", "Verse text 1"));
}

#[tokio::test]
async fn test_get_missing_set_is_backend_error() {
    let server = StubServer::start().await;
    let err = server.client().get_set(SetId(404)).await.unwrap_err();

    match err {
        ApiError::Backend { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "set not found");
        }
        other => panic!("expected backend error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_toggle_favorite_alternates() {
    let server = StubServer::start().await;
    let client = server.client();

    assert_eq!(client.toggle_favorite(SetId(1)).await.unwrap(), FavoriteStatus::Added);
    assert!(server.state.is_favorite(1));
    assert_eq!(client.toggle_favorite(SetId(1)).await.unwrap(), FavoriteStatus::Removed);
    assert!(!server.state.is_favorite(1));
}

#[tokio::test]
async fn test_toggle_favorite_server_failure() {
    let server = StubServer::start().await;
    let err = server
        .client()
        .toggle_favorite(SetId(BROKEN_FAVORITE_SET))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Backend { status: 500, .. }));
}

#[tokio::test]
async fn test_lookup_returns_canonical_reference() {
    let server = StubServer::start().await;
    server
        .state
        .add_verse("jn 3:16", "John 3:16", "For God so loved the world");

    let lookup = server.client().lookup_verse("jn 3:16", true).await.unwrap();
    assert_eq!(lookup.reference, "John 3:16");
    assert_eq!(lookup.verse, "[1] For God so loved the world");

    let lookup = server.client().lookup_verse("jn 3:16", false).await.unwrap();
    assert_eq!(lookup.verse, "For God so loved the world");
    assert_eq!(server.state.lookups(), vec!["jn 3:16", "jn 3:16"]);
}

#[tokio::test]
async fn test_lookup_flat_response() {
    let server = StubServer::start().await;
    server.state.add_verse("jn 3:16", "John 3:16", "For God so loved the world");
    server.state.use_flat_lookups();

    let lookup = server.client().lookup_verse("jn 3:16", false).await.unwrap();
    assert_eq!(lookup.reference, "jn 3:16");
    assert_eq!(lookup.verse, "For God so loved the world");
}

#[tokio::test]
async fn test_lookup_unknown_passage() {
    let server = StubServer::start().await;
    let err = server.client().lookup_verse("Hezekiah 1:1", true).await.unwrap_err();
    assert!(matches!(err, ApiError::PassageNotFound(ref r) if r == "Hezekiah 1:1"));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Bind then drop a listener to get a port nobody serves.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(format!("http://{}", addr));
    let err = client.get_set(SetId(1)).await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}
