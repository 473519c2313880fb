//! OMDb (Open Movie Database) API client
//!
//! Title search only. API docs: https://www.omdbapi.com/

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

use crate::models::{SearchError, SearchResponse};

/// Public OMDb endpoint
pub const DEFAULT_BASE_URL: &str = "http://www.omdbapi.com";

/// Bundled API key, used when neither env nor config supplies one
pub const DEFAULT_API_KEY: &str = "fd91ab31";

/// Anything that can answer a title search.
///
/// The state machine only sees this trait, so tests drive it with a mock.
#[async_trait]
pub trait MovieService: Send + Sync {
    async fn search(&self, term: &str) -> Result<SearchResponse, SearchError>;
}

/// OMDb API client
#[derive(Debug, Clone)]
pub struct OmdbClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl OmdbClient {
    /// Create a new OMDb client with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Request URL for a search term
    pub fn search_url(&self, term: &str) -> String {
        format!(
            "{}/?s={}&apikey={}",
            self.base_url,
            urlencoding::encode(term),
            urlencoding::encode(&self.api_key)
        )
    }

    async fn fetch(&self, term: &str) -> Result<SearchResponse, SearchError> {
        let url = self.search_url(term);

        let response = self.client.get(&url).send().await.map_err(|e| {
            debug!(error = %e, "search request failed");
            SearchError::General
        })?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "search returned non-success status");
            return Err(SearchError::General);
        }

        let body = response.text().await.map_err(|e| {
            debug!(error = %e, "failed to read search body");
            SearchError::General
        })?;
        debug!(body = %body, "search response");

        serde_json::from_str(&body).map_err(|e| {
            debug!(error = %e, "failed to decode search envelope");
            SearchError::General
        })
    }
}

#[async_trait]
impl MovieService for OmdbClient {
    async fn search(&self, term: &str) -> Result<SearchResponse, SearchError> {
        info!(term, "searching OMDb");
        self.fetch(term).await?.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_embeds_term_and_key() {
        let client = OmdbClient::with_base_url("k3y", "http://localhost:1234/");
        assert_eq!(
            client.search_url("batman"),
            "http://localhost:1234/?s=batman&apikey=k3y"
        );
    }

    #[test]
    fn test_search_url_encodes_spaces() {
        let client = OmdbClient::new(DEFAULT_API_KEY);
        assert_eq!(
            client.search_url("the dark knight"),
            "http://www.omdbapi.com/?s=the%20dark%20knight&apikey=fd91ab31"
        );
    }
}
