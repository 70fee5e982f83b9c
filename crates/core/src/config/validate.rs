use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - A TMDB API key is present
/// - Search limit is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.catalog.api_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "catalog.api_key is required (set API_KEY or SERIESWATCH_CATALOG__API_KEY)"
                .to_string(),
        ));
    }

    if config.catalog.search_limit == 0 {
        return Err(ConfigError::ValidationError(
            "catalog.search_limit cannot be 0".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key(key: &str) -> Config {
        let mut config = Config::default();
        config.catalog.api_key = key.to_string();
        config
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_config(&config_with_key("abc")).is_ok());
    }

    #[test]
    fn test_validate_missing_api_key_fails() {
        let result = validate_config(&Config::default());
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_blank_api_key_fails() {
        let result = validate_config(&config_with_key("   "));
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_search_limit_zero_fails() {
        let mut config = config_with_key("abc");
        config.catalog.search_limit = 0;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("search_limit"));
    }
}
