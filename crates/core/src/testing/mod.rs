//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the catalog and notifier
//! traits, allowing update checks to be exercised without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use serieswatch_core::testing::{fixtures, MockShowCatalog};
//!
//! let catalog = MockShowCatalog::new();
//! catalog.add_series(fixtures::show_details(101, "Foo", 3)).await;
//!
//! // Use as Arc<dyn ShowCatalog> in an UpdateChecker...
//! ```

mod mock_notifier;
mod mock_show_catalog;

pub use mock_notifier::MockNotifier;
pub use mock_show_catalog::{MockShowCatalog, RecordedCatalogQuery};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::catalog::{ShowDetails, ShowSummary};
    use crate::store::ShowRecord;

    /// Create a stored show record.
    pub fn record(name: &str, season_count: u32, show_id: u32) -> ShowRecord {
        ShowRecord::new(name, season_count, show_id)
    }

    /// Create catalog details for a show with reasonable defaults.
    pub fn show_details(id: u32, name: &str, seasons: u32) -> ShowDetails {
        ShowDetails {
            id,
            name: name.to_string(),
            number_of_seasons: seasons,
            number_of_episodes: seasons * 10,
            first_air_date: Some("2020-01-01".to_string()),
            status: Some("Returning Series".to_string()),
        }
    }

    /// Create a search result.
    pub fn show_summary(id: u32, name: &str, year: u32, country: &str) -> ShowSummary {
        ShowSummary {
            id,
            name: name.to_string(),
            first_air_date: Some(format!("{}-09-01", year)),
            origin_country: vec![country.to_string()],
        }
    }
}
