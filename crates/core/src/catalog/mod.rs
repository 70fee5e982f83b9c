//! Remote show catalog integration.
//!
//! The catalog answers two questions: which shows match a name, and how
//! many seasons a given show has right now.

mod tmdb;
mod types;

pub use tmdb::{TmdbClient, TmdbConfig};
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when interacting with a show catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimitExceeded,

    /// Resource not found (404).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured (missing or rejected API key).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// Trait for show catalog clients.
///
/// Failures are always reported as errors; "no matches" is an empty `Vec`.
#[async_trait]
pub trait ShowCatalog: Send + Sync {
    /// Search for TV shows by name.
    async fn search_tv(&self, query: &str) -> Result<Vec<ShowSummary>, CatalogError>;

    /// Get current details for a show by catalog ID.
    async fn get_tv(&self, show_id: u32) -> Result<ShowDetails, CatalogError>;
}
