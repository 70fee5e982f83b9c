//! Record types for the show store.

use serde::{Deserialize, Serialize};

/// Canonical header row of the backing file.
pub const SHOW_FIELDS: [&str; 3] = ["Show Name", "Seasons", "Show ID"];

/// One saved show.
///
/// `name` is the key: it is never duplicated and, like `show_id`, never
/// changes after the record is first written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShowRecord {
    /// Human-readable title, unique within the store.
    pub name: String,
    /// Last known number of seasons.
    pub season_count: u32,
    /// Catalog identifier used to fetch fresh details.
    pub show_id: u32,
}

impl ShowRecord {
    pub fn new(name: impl Into<String>, season_count: u32, show_id: u32) -> Self {
        Self {
            name: name.into(),
            season_count,
            show_id,
        }
    }
}

/// A record whose catalog season count exceeds the stored one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeasonDelta {
    pub name: String,
    pub new_season_count: u32,
    pub show_id: u32,
}

impl SeasonDelta {
    pub fn new(name: impl Into<String>, new_season_count: u32, show_id: u32) -> Self {
        Self {
            name: name.into(),
            new_season_count,
            show_id,
        }
    }
}

/// Result of reading every record from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The backing file is empty: nothing has been saved yet.
    NoData,
    /// Header was present; records are in file order.
    Loaded {
        records: Vec<ShowRecord>,
        /// Rows that could not be parsed and were left out.
        skipped_rows: usize,
    },
}

impl LoadOutcome {
    /// Records loaded, empty for [`LoadOutcome::NoData`].
    pub fn records(&self) -> &[ShowRecord] {
        match self {
            LoadOutcome::NoData => &[],
            LoadOutcome::Loaded { records, .. } => records,
        }
    }

    pub fn into_records(self) -> Vec<ShowRecord> {
        match self {
            LoadOutcome::NoData => Vec::new(),
            LoadOutcome::Loaded { records, .. } => records,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, LoadOutcome::NoData)
    }
}

/// Result of an insert-if-absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new row was appended.
    Saved,
    /// A row with this name already exists; nothing was written.
    AlreadyExists,
}
