//! Types returned by show catalogs.

use serde::{Deserialize, Serialize};

/// A show as returned by a catalog search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShowSummary {
    /// Catalog show ID.
    pub id: u32,
    /// Show name.
    pub name: String,
    /// First air date (YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<String>,
    /// ISO 3166-1 country codes of origin.
    #[serde(default)]
    pub origin_country: Vec<String>,
}

impl ShowSummary {
    /// Get the first-air year from the first air date.
    pub fn year(&self) -> Option<u32> {
        self.first_air_date
            .as_ref()
            .and_then(|d| d.split('-').next())
            .and_then(|y| y.parse().ok())
    }

    /// First listed country of origin.
    pub fn country(&self) -> Option<&str> {
        self.origin_country.first().map(String::as_str)
    }
}

/// Full details for a single show.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShowDetails {
    /// Catalog show ID.
    pub id: u32,
    /// Show name.
    pub name: String,
    /// Number of seasons currently listed.
    #[serde(default)]
    pub number_of_seasons: u32,
    /// Number of episodes currently listed.
    #[serde(default)]
    pub number_of_episodes: u32,
    /// First air date (YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<String>,
    /// Production status, e.g. "Returning Series" or "Ended".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}
