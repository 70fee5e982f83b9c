use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::store::SeasonDelta;

/// A show whose details could not be fetched during a skipping check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchFailure {
    pub name: String,
    pub show_id: u32,
    pub error: String,
}

/// Outcome of a full update check.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateReport {
    pub checked_at: DateTime<Utc>,
    /// The store was empty; nothing was checked.
    pub no_data: bool,
    /// Records examined.
    pub checked: usize,
    /// Malformed store rows left out of the check.
    pub skipped_rows: usize,
    /// Shows with new seasons, in store order.
    pub deltas: Vec<SeasonDelta>,
    pub failures: Vec<FetchFailure>,
    /// Rows actually rewritten.
    pub applied: usize,
}

impl UpdateReport {
    pub fn no_data(checked_at: DateTime<Utc>) -> Self {
        Self {
            checked_at,
            no_data: true,
            checked: 0,
            skipped_rows: 0,
            deltas: Vec::new(),
            failures: Vec::new(),
            applied: 0,
        }
    }

    pub fn has_updates(&self) -> bool {
        !self.deltas.is_empty()
    }
}
