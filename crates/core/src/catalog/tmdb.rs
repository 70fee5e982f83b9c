//! TMDB (The Movie Database) API client.
//!
//! TMDB requires an API key for access.
//! Rate limits are generous (around 40 requests per second).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{ShowDetails, ShowSummary};
use super::{CatalogError, ShowCatalog};
use crate::config::CatalogConfig;

const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// TMDB API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    /// TMDB API key (required).
    pub api_key: String,
    /// Base URL (default: https://api.themoviedb.org/3).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Response language, e.g. "en".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl From<&CatalogConfig> for TmdbConfig {
    fn from(config: &CatalogConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_url: Some(config.base_url.clone()),
            language: Some(config.language.clone()),
        }
    }
}

/// TMDB API client.
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
    language: Option<String>,
}

impl TmdbClient {
    /// Create a new TMDB client.
    pub fn new(config: TmdbConfig) -> Result<Self, CatalogError> {
        if config.api_key.trim().is_empty() {
            return Err(CatalogError::NotConfigured(
                "TMDB API key is required".to_string(),
            ));
        }

        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
            language: config.language,
        })
    }

    fn auth_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("api_key", self.api_key.clone())];
        if let Some(language) = &self.language {
            params.push(("language", language.clone()));
        }
        params
    }

    /// Map non-success statuses onto catalog errors.
    async fn check_status(response: Response, what: String) -> Result<Response, CatalogError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        match status {
            StatusCode::UNAUTHORIZED => Err(CatalogError::NotConfigured(
                "Invalid TMDB API key".to_string(),
            )),
            StatusCode::NOT_FOUND => Err(CatalogError::NotFound(what)),
            StatusCode::TOO_MANY_REQUESTS => Err(CatalogError::RateLimitExceeded),
            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(CatalogError::ApiError {
                    status: status.as_u16(),
                    message: body,
                })
            }
        }
    }
}

#[async_trait]
impl ShowCatalog for TmdbClient {
    async fn search_tv(&self, query: &str) -> Result<Vec<ShowSummary>, CatalogError> {
        let url = format!("{}/search/tv", self.base_url);

        debug!("TMDB TV search: query='{}'", query);

        let response = self
            .client
            .get(&url)
            .query(&self.auth_params())
            .query(&[("query", query)])
            .send()
            .await?;

        let response = Self::check_status(response, format!("TV search '{}'", query)).await?;

        let search_result: TmdbSearchResponse<TmdbTvResult> =
            response.json().await.map_err(|e| {
                CatalogError::ParseError(format!("Failed to parse TV search response: {}", e))
            })?;

        debug!("TMDB TV search returned {} results", search_result.results.len());

        Ok(search_result
            .results
            .into_iter()
            .map(|r| r.into())
            .collect())
    }

    async fn get_tv(&self, show_id: u32) -> Result<ShowDetails, CatalogError> {
        let url = format!("{}/tv/{}", self.base_url, show_id);

        debug!("TMDB get TV: id={}", show_id);

        let response = self
            .client
            .get(&url)
            .query(&self.auth_params())
            .send()
            .await?;

        let response = Self::check_status(response, format!("TV series ID {}", show_id)).await?;

        let details: TmdbTvDetails = response.json().await.map_err(|e| {
            CatalogError::ParseError(format!("Failed to parse TV response: {}", e))
        })?;

        Ok(details.into())
    }
}

// ============================================================================
// TMDB API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct TmdbSearchResponse<T> {
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct TmdbTvResult {
    id: u32,
    name: String,
    first_air_date: Option<String>,
    #[serde(default)]
    origin_country: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbTvDetails {
    id: u32,
    name: String,
    first_air_date: Option<String>,
    number_of_seasons: Option<u32>,
    number_of_episodes: Option<u32>,
    status: Option<String>,
}

// ============================================================================
// Conversions
// ============================================================================

impl From<TmdbTvResult> for ShowSummary {
    fn from(r: TmdbTvResult) -> Self {
        Self {
            id: r.id,
            name: r.name,
            // TMDB sends "" for unknown dates
            first_air_date: r.first_air_date.filter(|d| !d.is_empty()),
            origin_country: r.origin_country,
        }
    }
}

impl From<TmdbTvDetails> for ShowDetails {
    fn from(d: TmdbTvDetails) -> Self {
        Self {
            id: d.id,
            name: d.name,
            number_of_seasons: d.number_of_seasons.unwrap_or(0),
            number_of_episodes: d.number_of_episodes.unwrap_or(0),
            first_air_date: d.first_air_date.filter(|d| !d.is_empty()),
            status: d.status,
        }
    }
}
