//! Saved-show store.
//!
//! Shows live in a small flat table keyed by name. Records are only ever
//! inserted (if absent) or have their season count raised; nothing is
//! deleted.

mod csv_store;
mod types;

pub use csv_store::CsvShowStore;
pub use types::*;

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when reading or writing the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file did not exist and could not be created.
    #[error("Failed to create store file {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading or writing the backing file failed.
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV reader or writer failed.
    #[error("Store CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Trait for saved-show storage backends.
pub trait ShowStore: Send + Sync {
    /// Read every record in stored order.
    ///
    /// An empty backing file yields [`LoadOutcome::NoData`], not an error.
    fn load_all(&self) -> Result<LoadOutcome, StoreError>;

    /// Insert a record unless one with the same name already exists.
    ///
    /// Existing records are never overwritten.
    fn upsert(&self, record: &ShowRecord) -> Result<UpsertOutcome, StoreError>;

    /// Set the season count of the record named `name`.
    ///
    /// Returns `false` when no record has that name. No other field or row
    /// is changed.
    fn apply_season_update(&self, name: &str, new_season_count: u32)
        -> Result<bool, StoreError>;
}
