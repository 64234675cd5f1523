//! HTTP client for the ranking service and the movie metadata service.
//!
//! This crate provides the network collaborators around the scoring core:
//! - Fetching the prompt (movies to rank and the people voting)
//! - Fetching metadata for one movie
//! - Submitting the final ordering and reading back the achieved score
//!
//! Every non-2xx response, transport failure or undecodable body is an error.
//! Callers are expected to abort the run rather than rank partial data.

use std::time::Duration;

use data_loader::{Movie, MovieId, Prompt};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info, instrument};

/// Errors that can occur when talking to the remote services
#[derive(Error, Debug)]
pub enum ApiClientError {
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}")]
    Status { url: String, status: StatusCode },

    #[error("Invalid response from {url}: {reason}")]
    InvalidResponse { url: String, reason: String },

    #[error("Metadata service has no movie {id}: {reason}")]
    MovieNotFound { id: MovieId, reason: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ApiClientError>;

/// Connection settings for both services.
///
/// The API key is sent as a query parameter and never appears in logs or
/// error messages.
#[derive(Clone)]
pub struct ApiClientConfig {
    /// Base URL of the ranking service (prompt and submission endpoints)
    pub api_base_url: String,
    /// Base URL of the OMDb-style metadata service
    pub metadata_base_url: String,
    pub api_key: String,
    pub request_timeout: Duration,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            metadata_base_url: "http://www.omdbapi.com".to_string(),
            api_key: String::new(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl std::fmt::Debug for ApiClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClientConfig")
            .field("api_base_url", &self.api_base_url)
            .field("metadata_base_url", &self.metadata_base_url)
            .field("api_key", &"<redacted>")
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct SubmitRequest<'a> {
    movies: &'a [MovieId],
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    score: f64,
}

/// Client for the ranking and metadata services.
///
/// Cloning is cheap; clones share one connection pool, so a client can be
/// handed to many concurrent fetch tasks.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiClientConfig,
}

impl ApiClient {
    /// Build a client from connection settings.
    pub fn new(config: ApiClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(ApiClientError::Build)?;

        info!(
            "API client ready (api: {}, metadata: {})",
            config.api_base_url, config.metadata_base_url
        );
        Ok(Self {
            client,
            config: ApiClientConfig {
                api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
                metadata_base_url: config.metadata_base_url.trim_end_matches('/').to_string(),
                ..config
            },
        })
    }

    /// Fetch the prompt: which movies to rank and who is voting.
    #[instrument(skip(self))]
    pub async fn fetch_prompt(&self) -> Result<Prompt> {
        let url = format!("{}/prompt", self.config.api_base_url);
        let request = self
            .client
            .get(&url)
            .query(&[("apiKey", self.config.api_key.as_str())]);

        let prompt: Prompt = self.send_json(&url, request).await?;
        debug!(
            "Prompt has {} movies and {} people",
            prompt.movies.len(),
            prompt.people.len()
        );
        Ok(prompt)
    }

    /// Fetch metadata for one movie.
    ///
    /// The metadata service answers unknown ids with a 200 and
    /// `"Response": "False"`; that is reported as `MovieNotFound`.
    #[instrument(skip(self))]
    pub async fn fetch_movie(&self, id: &str) -> Result<Movie> {
        let url = format!("{}/", self.config.metadata_base_url);
        let request = self
            .client
            .get(&url)
            .query(&[("i", id), ("apikey", self.config.api_key.as_str())]);

        let body: serde_json::Value = self.send_json(&url, request).await?;
        if body.get("Response").and_then(|v| v.as_str()) == Some("False") {
            let reason = body
                .get("Error")
                .and_then(|v| v.as_str())
                .unwrap_or("no reason given")
                .to_string();
            return Err(ApiClientError::MovieNotFound {
                id: id.to_string(),
                reason,
            });
        }

        let movie: Movie =
            serde_json::from_value(body).map_err(|e| ApiClientError::InvalidResponse {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        if movie.id != id {
            return Err(ApiClientError::InvalidResponse {
                url,
                reason: format!("asked for {} but received {}", id, movie.id),
            });
        }
        Ok(movie)
    }

    /// Submit a ranking and return the score the service awards it.
    ///
    /// # Arguments
    /// * `ranking` - Movie ids, best first
    #[instrument(skip(self, ranking), fields(movies = ranking.len()))]
    pub async fn submit_ranking(&self, ranking: &[MovieId]) -> Result<f64> {
        let url = format!("{}/submit", self.config.api_base_url);
        let request = self
            .client
            .post(&url)
            .query(&[("apiKey", self.config.api_key.as_str())])
            .json(&SubmitRequest { movies: ranking });

        let response: SubmitResponse = self.send_json(&url, request).await?;
        info!("Ranking accepted with score {}", response.score);
        Ok(response.score)
    }

    async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T> {
        // Strip the URL from transport errors; its query carries the API key
        let response = request.send().await.map_err(|e| {
            let e = e.without_url();
            error!("Request to {} failed: {}", url, e);
            ApiClientError::Transport {
                url: url.to_string(),
                source: e,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("{} returned {}", url, status);
            return Err(ApiClientError::Status {
                url: url.to_string(),
                status,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ApiClientError::InvalidResponse {
                url: url.to_string(),
                reason: e.without_url().to_string(),
            })
    }
}
