//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: ProxyConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;
    normalize(&mut config);

    Ok(config)
}

/// Canonicalize values whose exact spelling the rest of the system relies on.
///
/// The base URL must not end with '/': asset paths are appended with their
/// own separator, and a doubled slash changes the upstream URL.
fn normalize(config: &mut ProxyConfig) {
    while config.upstream.base_url.ends_with('/') {
        config.upstream.base_url.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_minimal_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[downloads]\ninfer_content_type = false").unwrap();

        let config = load_config(file.path()).unwrap();
        assert!(!config.downloads.infer_content_type);
        // Untouched sections fall back to defaults.
        assert_eq!(config.downloads.path_prefix, "/dl/");
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn test_trailing_slash_is_normalized() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[upstream]\nbase_url = \"https://github.com/org/repo/releases/download/\""
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(
            config.upstream.base_url,
            "https://github.com/org/repo/releases/download"
        );
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[upstream]\nbase_url = \"not-a-url\"").unwrap();

        match load_config(file.path()) {
            Err(ConfigError::Validation(errors)) => assert!(!errors.is_empty()),
            other => panic!("expected validation error, got {:?}", other.map(|_| ())),
        }
    }
}
