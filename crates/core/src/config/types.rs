use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub update: UpdateConfig,
    #[serde(default)]
    pub notifier: NotifierConfig,
}

/// TMDB catalog configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// TMDB API key. Empty means "not configured" and fails validation.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_language")]
    pub language: String,
    /// Maximum number of search results offered for selection.
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            language: default_language(),
            search_limit: default_search_limit(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_search_limit() -> usize {
    8
}

/// Show store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("serie_db.csv")
}

/// Update check configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateConfig {
    #[serde(default)]
    pub on_fetch_error: FailurePolicy,
}

/// What an update check does when fetching one show's details fails.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Abandon the whole pass on the first failure.
    #[default]
    Abort,
    /// Log the failure, skip that show and keep going.
    Skip,
}

/// Notification configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NotifierConfig {
    /// Pause between consecutive notifications, in seconds.
    #[serde(default)]
    pub interval_secs: u64,
}

/// Sanitized config for display (API key redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub catalog: SanitizedCatalogConfig,
    pub store: StoreConfig,
    pub update: UpdateConfig,
    pub notifier: NotifierConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedCatalogConfig {
    pub api_key_configured: bool,
    pub base_url: String,
    pub language: String,
    pub search_limit: usize,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            catalog: SanitizedCatalogConfig {
                api_key_configured: !config.catalog.api_key.is_empty(),
                base_url: config.catalog.base_url.clone(),
                language: config.catalog.language.clone(),
                search_limit: config.catalog.search_limit,
            },
            store: config.store.clone(),
            update: config.update.clone(),
            notifier: config.notifier.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_empty_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.catalog.api_key.is_empty());
        assert_eq!(config.catalog.base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.catalog.language, "en");
        assert_eq!(config.catalog.search_limit, 8);
        assert_eq!(config.store.path.to_str().unwrap(), "serie_db.csv");
        assert_eq!(config.update.on_fetch_error, FailurePolicy::Abort);
        assert_eq!(config.notifier.interval_secs, 0);
    }

    #[test]
    fn test_deserialize_full_config() {
        let toml = r#"
[catalog]
api_key = "abc123"
language = "de"
search_limit = 5

[store]
path = "/data/shows.csv"

[update]
on_fetch_error = "skip"

[notifier]
interval_secs = 7
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.catalog.api_key, "abc123");
        assert_eq!(config.catalog.language, "de");
        assert_eq!(config.catalog.search_limit, 5);
        assert_eq!(config.store.path.to_str().unwrap(), "/data/shows.csv");
        assert_eq!(config.update.on_fetch_error, FailurePolicy::Skip);
        assert_eq!(config.notifier.interval_secs, 7);
    }

    #[test]
    fn test_deserialize_unknown_policy_fails() {
        let toml = r#"
[update]
on_fetch_error = "retry"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_sanitized_config_hides_api_key() {
        let mut config = Config::default();
        config.catalog.api_key = "secret-key".to_string();

        let sanitized = SanitizedConfig::from(&config);
        assert!(sanitized.catalog.api_key_configured);

        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("secret-key"));
    }

    #[test]
    fn test_sanitized_config_without_api_key() {
        let sanitized = SanitizedConfig::from(&Config::default());
        assert!(!sanitized.catalog.api_key_configured);
        assert_eq!(sanitized.catalog.search_limit, 8);
    }
}
