//! New-season detection.
//!
//! The checker compares each saved show's season count with the catalog's
//! current count and raises the stored value when the catalog has more.

mod types;

pub use types::*;

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::{CatalogError, ShowCatalog};
use crate::config::FailurePolicy;
use crate::store::{LoadOutcome, SeasonDelta, ShowRecord, ShowStore, StoreError};

/// Errors that abort an update check.
#[derive(Debug, Error)]
pub enum CheckError {
    /// Fetching a show's details failed under [`FailurePolicy::Abort`].
    #[error("Failed to fetch details for '{name}' (id {show_id}): {source}")]
    Catalog {
        name: String,
        show_id: u32,
        #[source]
        source: CatalogError,
    },

    /// Reading or writing the store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Detects and applies season count increases.
pub struct UpdateChecker {
    catalog: Arc<dyn ShowCatalog>,
    store: Arc<dyn ShowStore>,
    policy: FailurePolicy,
}

impl UpdateChecker {
    /// Create a checker that aborts on the first catalog failure.
    pub fn new(catalog: Arc<dyn ShowCatalog>, store: Arc<dyn ShowStore>) -> Self {
        Self {
            catalog,
            store,
            policy: FailurePolicy::Abort,
        }
    }

    /// Set what happens when one show's details cannot be fetched.
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Records whose catalog season count is strictly greater than stored.
    ///
    /// Output keeps input order. An empty input makes no catalog calls.
    pub async fn compute_deltas(
        &self,
        records: &[ShowRecord],
    ) -> Result<Vec<SeasonDelta>, CheckError> {
        Ok(self.scan(records).await?.deltas)
    }

    /// Write each delta's season count to the store.
    ///
    /// Returns how many rows were updated. Empty input does not touch the
    /// store.
    pub fn apply(&self, deltas: &[SeasonDelta]) -> Result<usize, StoreError> {
        let mut applied = 0;
        for delta in deltas {
            if self
                .store
                .apply_season_update(&delta.name, delta.new_season_count)?
            {
                applied += 1;
            }
        }
        Ok(applied)
    }

    /// Load every record, compute deltas and apply them.
    ///
    /// Nothing is written if computing the deltas fails.
    pub async fn check_for_updates(&self) -> Result<UpdateReport, CheckError> {
        let checked_at = Utc::now();

        let (records, skipped_rows) = match self.store.load_all()? {
            LoadOutcome::NoData => {
                debug!("Show store is empty, nothing to check");
                return Ok(UpdateReport::no_data(checked_at));
            }
            LoadOutcome::Loaded {
                records,
                skipped_rows,
            } => (records, skipped_rows),
        };

        let scan = self.scan(&records).await?;
        let applied = self.apply(&scan.deltas)?;

        info!(
            "Checked {} shows: {} with new seasons, {} failed",
            records.len(),
            scan.deltas.len(),
            scan.failures.len()
        );

        Ok(UpdateReport {
            checked_at,
            no_data: false,
            checked: records.len(),
            skipped_rows,
            deltas: scan.deltas,
            failures: scan.failures,
            applied,
        })
    }

    async fn scan(&self, records: &[ShowRecord]) -> Result<Scan, CheckError> {
        let mut scan = Scan::default();

        for record in records {
            let details = match self.catalog.get_tv(record.show_id).await {
                Ok(details) => details,
                Err(source) => match self.policy {
                    FailurePolicy::Abort => {
                        return Err(CheckError::Catalog {
                            name: record.name.clone(),
                            show_id: record.show_id,
                            source,
                        });
                    }
                    FailurePolicy::Skip => {
                        warn!(
                            "Skipping '{}' (id {}): {}",
                            record.name, record.show_id, source
                        );
                        scan.failures.push(FetchFailure {
                            name: record.name.clone(),
                            show_id: record.show_id,
                            error: source.to_string(),
                        });
                        continue;
                    }
                },
            };

            if details.number_of_seasons > record.season_count {
                debug!(
                    "'{}' has {} seasons (stored {})",
                    record.name, details.number_of_seasons, record.season_count
                );
                scan.deltas.push(SeasonDelta::new(
                    record.name.clone(),
                    details.number_of_seasons,
                    record.show_id,
                ));
            }
        }

        Ok(scan)
    }
}

#[derive(Debug, Default)]
struct Scan {
    deltas: Vec<SeasonDelta>,
    failures: Vec<FetchFailure>,
}
