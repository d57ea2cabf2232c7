use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Search timeout is not zero
/// - Cache paths are not empty
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.router.search_timeout_ms == 0 {
        return Err(ConfigError::ValidationError(
            "router.search_timeout_ms cannot be 0".to_string(),
        ));
    }

    if config.storage.format_cache_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "storage.format_cache_path cannot be empty".to_string(),
        ));
    }

    if config.storage.path_store_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "storage.path_store_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
