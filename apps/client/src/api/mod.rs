//! HTTP client for the verse study REST API.

mod wire;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use verse_core::types::{FavoriteStatus, SetId, VerseLookup, VerseSet};

pub use wire::PASSAGE_NOT_FOUND;
use wire::{FavoriteResponse, LookupQuery, LookupResponse};

/// API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend error: {status} - {message}")]
    Backend { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Passage not found: {0}")]
    PassageNotFound(String),
}

struct ApiClientInner {
    client: Client,
    base_url: String,
}

/// Client for `/api/sets` and `/api/verse`.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: base_url.trim_end_matches('/').to_string(),
            }),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Fetch the verses of a set.
    pub async fn get_set(&self, set_id: SetId) -> Result<VerseSet, ApiError> {
        let url = format!("{}/api/sets/{}", self.inner.base_url, set_id);
        tracing::debug!(%url, "fetching verse set");

        let resp = self
            .inner
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let set: VerseSet = Self::read_json(resp).await?;
        tracing::debug!(set_id = %set_id, verses = set.cards.len(), "verse set loaded");
        Ok(set)
    }

    /// Toggle the current user's favorite flag on a set.
    pub async fn toggle_favorite(&self, set_id: SetId) -> Result<FavoriteStatus, ApiError> {
        let url = format!("{}/api/sets/{}/favorite", self.inner.base_url, set_id);

        let resp = self
            .inner
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let response: FavoriteResponse = Self::read_json(resp).await?;
        tracing::debug!(set_id = %set_id, message = %response.message, "favorite toggled");
        Ok(response.status())
    }

    /// Look up the verse text for a reference.
    pub async fn lookup_verse(
        &self,
        reference: &str,
        get_verse_num: bool,
    ) -> Result<VerseLookup, ApiError> {
        let url = format!("{}/api/verse", self.inner.base_url);
        let query = LookupQuery {
            reference,
            get_verse_num,
        };

        let resp = self
            .inner
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let response: LookupResponse = Self::read_json(resp).await?;
        let lookup = response.into_lookup(reference);
        if lookup.verse.trim() == PASSAGE_NOT_FOUND {
            return Err(ApiError::PassageNotFound(reference.to_string()));
        }
        Ok(lookup)
    }

    async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(ApiError::Backend { status, message });
        }

        resp.json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:5000//");
        assert_eq!(client.base_url(), "http://localhost:5000");
    }

    #[test]
    fn test_error_display() {
        let error = ApiError::Backend {
            status: 404,
            message: "missing".to_string(),
        };
        assert_eq!(error.to_string(), "Backend error: 404 - missing");
        assert_eq!(
            ApiError::PassageNotFound("Hez 1:1".to_string()).to_string(),
            "Passage not found: Hez 1:1"
        );
    }
}
