//! Remote posts client
//!
//! Fetches the post collection from JSONPlaceholder, serving it from the cache
//! store while the cached copy is fresh.

use std::sync::Arc;

use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

use super::Post;
use crate::cache::CacheStore;
use crate::config::Config;

/// Endpoint serving the post collection
pub const POSTS_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/posts";

/// Key the post collection is cached under
pub const POSTS_CACHE_KEY: &str = "wp_json_fetcher_posts";

/// Errors that can occur when fetching posts
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request failed or the endpoint answered with a non-success status
    #[error("Fetching posts failed: {0}")]
    FetchFailed(#[from] reqwest::Error),

    /// The endpoint answered but the body held no usable posts
    #[error("No posts found")]
    EmptyResult,
}

/// Client for fetching the post collection
#[derive(Clone)]
pub struct PostsClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Store consulted before, and populated after, every network fetch
    cache: Arc<dyn CacheStore>,
    /// URL the collection is fetched from (overridable for mirrors and tests)
    endpoint: String,
}

impl PostsClient {
    /// Creates a client using a default HTTP client and the given cache store
    pub fn new(cache: Arc<dyn CacheStore>) -> Self {
        Self::with_client(Client::new(), cache)
    }

    /// Creates a client with a custom HTTP client (e.g. one with a timeout)
    pub fn with_client(http_client: Client, cache: Arc<dyn CacheStore>) -> Self {
        Self {
            http_client,
            cache,
            endpoint: POSTS_ENDPOINT.to_string(),
        }
    }

    /// Points the client at a different endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the post collection
    ///
    /// # Behavior
    /// - A fresh cache entry is returned as-is with no network traffic
    /// - On a miss, exactly one request is made; there are no retries
    /// - A non-empty result is cached for `config.cache_seconds` before returning
    /// - A failed cache write is logged and the fetched posts are still returned
    pub async fn get_posts(&self, config: &Config) -> Result<Vec<Post>, FetchError> {
        if let Some(entry) = self.cache.get(POSTS_CACHE_KEY) {
            debug!(
                key = POSTS_CACHE_KEY,
                expires_at = %entry.expires_at,
                "serving posts from cache"
            );
            return Ok(entry.value);
        }

        debug!(endpoint = %self.endpoint, "cache miss, fetching posts");
        let posts = self.fetch_from_api().await.map_err(|err| {
            warn!(endpoint = %self.endpoint, error = %err, "failed to fetch posts");
            err
        })?;

        if let Err(err) = self.cache.set(POSTS_CACHE_KEY, &posts, config.cache_ttl()) {
            warn!(key = POSTS_CACHE_KEY, error = %err, "failed to cache posts");
        }

        Ok(posts)
    }

    async fn fetch_from_api(&self) -> Result<Vec<Post>, FetchError> {
        let response = self
            .http_client
            .get(&self.endpoint)
            .send()
            .await?
            .error_for_status()?;
        let text = response.text().await?;

        parse_posts(&text)
    }
}

/// Decodes a response body into posts
///
/// Anything other than a non-empty JSON array of objects counts as an empty
/// result, matching how the endpoint's callers treat undecodable payloads.
fn parse_posts(body: &str) -> Result<Vec<Post>, FetchError> {
    match serde_json::from_str::<Vec<Post>>(body) {
        Ok(posts) if !posts.is_empty() => Ok(posts),
        _ => Err(FetchError::EmptyResult),
    }
}
