use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "serieswatch.toml";

/// Prefix for environment overrides, e.g. `SERIESWATCH_STORE__PATH`.
pub const ENV_PREFIX: &str = "SERIESWATCH_";

/// Plain environment variable holding the TMDB key.
pub const API_KEY_VAR: &str = "API_KEY";

/// Load configuration from an optional file with environment variable overrides.
///
/// An explicitly given path must exist. Without one, `serieswatch.toml` in the
/// working directory is merged if present.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut figment = Figment::new();

    match path {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.display().to_string()));
            }
            figment = figment.merge(Toml::file(path));
        }
        None => {
            figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE));
        }
    }

    // Merged as a serialized string so numeric-looking keys stay strings.
    if let Ok(api_key) = std::env::var(API_KEY_VAR) {
        if !api_key.is_empty() {
            figment = figment.merge(Serialized::default("catalog.api_key", api_key));
        }
    }

    let config: Config = figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FailurePolicy;
    use figment::Jail;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[catalog]
api_key = "key"

[store]
path = "shows.csv"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.catalog.api_key, "key");
        assert_eq!(config.store.path.to_str().unwrap(), "shows.csv");
    }

    #[test]
    fn test_load_config_from_str_bad_type() {
        let toml = r#"
[catalog]
search_limit = "many"
"#;
        let result = load_config_from_str(toml);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Some(Path::new("/nonexistent/serieswatch.toml")));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[catalog]
search_limit = 3

[store]
path = "/tmp/my-shows.csv"

[update]
on_fetch_error = "skip"
"#
        )
        .unwrap();

        let config = load_config(Some(temp_file.path())).unwrap();
        assert_eq!(config.catalog.search_limit, 3);
        assert_eq!(config.store.path.to_str().unwrap(), "/tmp/my-shows.csv");
        assert_eq!(config.update.on_fetch_error, FailurePolicy::Skip);
    }

    #[test]
    fn test_load_config_from_malformed_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[catalog\nsearch_limit = ").unwrap();

        let result = load_config(Some(temp_file.path()));
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_plain_api_key_var_fills_catalog_key() {
        Jail::expect_with(|jail| {
            jail.set_env("API_KEY", "12345");

            let config = load_config(None).map_err(|e| e.to_string())?;
            assert_eq!(config.catalog.api_key, "12345");
            Ok(())
        });
    }

    #[test]
    fn test_plain_api_key_var_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_CONFIG_FILE,
                r#"
[catalog]
api_key = "from-file"
search_limit = 4
"#,
            )?;
            jail.set_env("API_KEY", "from-env");

            let config = load_config(None).map_err(|e| e.to_string())?;
            assert_eq!(config.catalog.api_key, "from-env");
            assert_eq!(config.catalog.search_limit, 4);
            Ok(())
        });
    }

    #[test]
    fn test_prefixed_api_key_beats_plain_var() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_CONFIG_FILE,
                r#"
[catalog]
api_key = "from-file"
"#,
            )?;
            jail.set_env("API_KEY", "plain");
            jail.set_env("SERIESWATCH_CATALOG__API_KEY", "prefixed");

            let config = load_config(None).map_err(|e| e.to_string())?;
            assert_eq!(config.catalog.api_key, "prefixed");
            Ok(())
        });
    }
}
