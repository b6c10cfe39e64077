use crate::config::types::{Config, MarkerConfig, OutputConfig, QueryConfig, SourceEntry};
use crate::query::YearWindow;
use crate::ConfigError;
use url::Url;

const MIN_TIMEOUT_MS: u64 = 100;
const MAX_TIMEOUT_MS: u64 = 300_000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_query_config(&config.query)?;
    validate_window(&config.window)?;
    validate_marker_config(&config.marker)?;
    validate_output_config(&config.output)?;
    validate_sources(&config.sources)?;
    Ok(())
}

/// Validates request behavior configuration
fn validate_query_config(config: &QueryConfig) -> Result<(), ConfigError> {
    if config.timeout_ms < MIN_TIMEOUT_MS || config.timeout_ms > MAX_TIMEOUT_MS {
        return Err(ConfigError::Validation(format!(
            "timeout-ms must be between {} and {}, got {}",
            MIN_TIMEOUT_MS, MAX_TIMEOUT_MS, config.timeout_ms
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the target year window
fn validate_window(window: &YearWindow) -> Result<(), ConfigError> {
    if window.after >= window.through {
        return Err(ConfigError::Validation(format!(
            "window 'after' ({}) must be lower than 'through' ({})",
            window.after, window.through
        )));
    }

    Ok(())
}

/// Validates the marker definition
fn validate_marker_config(config: &MarkerConfig) -> Result<(), ConfigError> {
    for (field, value) in [
        ("tag", &config.tag),
        ("attribute", &config.attribute),
        ("contains", &config.contains),
    ] {
        if value.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "marker {} cannot be empty",
                field
            )));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    if config.error_file.is_empty() || config.log_file.is_empty() {
        return Err(ConfigError::Validation(
            "error-file and log-file cannot be empty".to_string(),
        ));
    }

    if config.error_file == config.log_file {
        return Err(ConfigError::Validation(format!(
            "error-file and log-file must differ, both are '{}'",
            config.error_file
        )));
    }

    Ok(())
}

/// Validates the source list
fn validate_sources(sources: &[SourceEntry]) -> Result<(), ConfigError> {
    if sources.is_empty() {
        return Err(ConfigError::Validation(
            "at least one [[source]] must be configured".to_string(),
        ));
    }

    for entry in sources {
        validate_label(&entry.label)?;

        let url = Url::parse(&entry.url).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid source URL '{}': {}", entry.url, e))
        })?;

        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(ConfigError::InvalidUrl(format!(
                "Source URL '{}' must use http or https",
                entry.url
            )));
        }
    }

    Ok(())
}

/// Labels end up in report lines, so keep them to a plain token
fn validate_label(label: &str) -> Result<(), ConfigError> {
    if label.is_empty() {
        return Err(ConfigError::Validation(
            "source label cannot be empty".to_string(),
        ));
    }

    if !label
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "source label must contain only alphanumeric characters, hyphens and underscores, got '{}'",
            label
        )));
    }

    Ok(())
}
