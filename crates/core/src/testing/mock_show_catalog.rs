//! Mock show catalog for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::catalog::{CatalogError, ShowCatalog, ShowDetails, ShowSummary};

/// A recorded catalog query for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCatalogQuery {
    SearchTv { query: String },
    GetTv { show_id: u32 },
}

/// Mock implementation of the ShowCatalog trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable shows and season counts
/// - Track queries for assertions
/// - Simulate one-off or per-show failures
///
/// # Example
///
/// ```rust,ignore
/// use serieswatch_core::testing::{MockShowCatalog, fixtures};
///
/// let catalog = MockShowCatalog::new();
/// catalog.add_series(fixtures::show_details(101, "Foo", 3)).await;
///
/// let details = catalog.get_tv(101).await?;
/// assert_eq!(details.number_of_seasons, 3);
/// ```
#[derive(Debug)]
pub struct MockShowCatalog {
    /// Show details by ID.
    series: Arc<RwLock<HashMap<u32, ShowDetails>>>,
    /// Explicit search results; when empty, search is answered from `series`.
    summaries: Arc<RwLock<Vec<ShowSummary>>>,
    /// Show IDs whose detail lookups always fail.
    failing: Arc<RwLock<HashSet<u32>>>,
    /// Recorded queries.
    queries: Arc<RwLock<Vec<RecordedCatalogQuery>>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<CatalogError>>>,
}

impl Default for MockShowCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MockShowCatalog {
    /// Create a new empty mock catalog.
    pub fn new() -> Self {
        Self {
            series: Arc::new(RwLock::new(HashMap::new())),
            summaries: Arc::new(RwLock::new(Vec::new())),
            failing: Arc::new(RwLock::new(HashSet::new())),
            queries: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Add (or replace) a show.
    pub async fn add_series(&self, details: ShowDetails) {
        self.series.write().await.insert(details.id, details);
    }

    /// Change the season count of a known show.
    pub async fn set_season_count(&self, show_id: u32, seasons: u32) {
        if let Some(details) = self.series.write().await.get_mut(&show_id) {
            details.number_of_seasons = seasons;
        }
    }

    /// Use these exact results for every search that matches by name.
    pub async fn set_search_results(&self, results: Vec<ShowSummary>) {
        *self.summaries.write().await = results;
    }

    /// Make every detail lookup for `show_id` fail.
    pub async fn fail_show(&self, show_id: u32) {
        self.failing.write().await.insert(show_id);
    }

    // =========================================================================
    // Query Recording
    // =========================================================================

    /// Get all recorded queries.
    pub async fn recorded_queries(&self) -> Vec<RecordedCatalogQuery> {
        self.queries.read().await.clone()
    }

    /// Clear recorded queries.
    pub async fn clear_recorded(&self) {
        self.queries.write().await.clear();
    }

    /// Get the number of queries performed.
    pub async fn query_count(&self) -> usize {
        self.queries.read().await.len()
    }

    // =========================================================================
    // Error Injection
    // =========================================================================

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: CatalogError) {
        *self.next_error.write().await = Some(error);
    }

    /// Take the next error if set.
    async fn take_error(&self) -> Option<CatalogError> {
        self.next_error.write().await.take()
    }

    /// Record a query.
    async fn record(&self, query: RecordedCatalogQuery) {
        self.queries.write().await.push(query);
    }
}

#[async_trait]
impl ShowCatalog for MockShowCatalog {
    async fn search_tv(&self, query: &str) -> Result<Vec<ShowSummary>, CatalogError> {
        self.record(RecordedCatalogQuery::SearchTv {
            query: query.to_string(),
        })
        .await;

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        let query_lower = query.to_lowercase();
        let summaries = self.summaries.read().await;

        if !summaries.is_empty() {
            return Ok(summaries
                .iter()
                .filter(|s| s.name.to_lowercase().contains(&query_lower))
                .cloned()
                .collect());
        }

        let series = self.series.read().await;
        let mut results: Vec<ShowSummary> = series
            .values()
            .filter(|s| s.name.to_lowercase().contains(&query_lower))
            .map(|s| ShowSummary {
                id: s.id,
                name: s.name.clone(),
                first_air_date: s.first_air_date.clone(),
                origin_country: Vec::new(),
            })
            .collect();
        results.sort_by_key(|s| s.id);

        Ok(results)
    }

    async fn get_tv(&self, show_id: u32) -> Result<ShowDetails, CatalogError> {
        self.record(RecordedCatalogQuery::GetTv { show_id }).await;

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        if self.failing.read().await.contains(&show_id) {
            return Err(CatalogError::ApiError {
                status: 500,
                message: format!("simulated failure for {}", show_id),
            });
        }

        self.series
            .read()
            .await
            .get(&show_id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("Series {} not found", show_id)))
    }
}
