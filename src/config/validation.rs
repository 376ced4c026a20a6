//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check addresses parse, the upstream URL is absolute, the prefix is sane
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before a config is accepted into the system, at startup and on reload

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic problem in a configuration.
#[derive(Debug)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Check everything serde cannot. Collects all errors before returning.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address",
            message: format!("not a socket address: {:?}", config.listener.bind_address),
        });
    }

    match Url::parse(&config.upstream.base_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError {
            field: "upstream.base_url",
            message: format!("scheme must be http or https, got {:?}", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError {
            field: "upstream.base_url",
            message: format!("not an absolute URL: {}", e),
        }),
    }

    let prefix = &config.downloads.path_prefix;
    if !prefix.starts_with('/') || !prefix.ends_with('/') || prefix.len() < 3 {
        errors.push(ValidationError {
            field: "downloads.path_prefix",
            message: format!(
                "must start and end with '/' and name a segment, got {:?}",
                prefix
            ),
        });
    }

    if !LOG_LEVELS.contains(&config.observability.log_level.as_str()) {
        errors.push(ValidationError {
            field: "observability.log_level",
            message: format!("unknown level {:?}", config.observability.log_level),
        });
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError {
            field: "observability.metrics_address",
            message: format!(
                "not a socket address: {:?}",
                config.observability.metrics_address
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ProxyConfig::default()).is_ok());
    }

    #[test]
    fn test_relative_base_url_is_rejected() {
        let mut config = ProxyConfig::default();
        config.upstream.base_url = "/releases/download".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "upstream.base_url"));
    }

    #[test]
    fn test_non_http_scheme_is_rejected() {
        let mut config = ProxyConfig::default();
        config.upstream.base_url = "ftp://example.com/releases".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "upstream.base_url"));
    }

    #[test]
    fn test_bare_slash_prefix_is_rejected() {
        let mut config = ProxyConfig::default();
        config.downloads.path_prefix = "/".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "downloads.path_prefix"));
    }

    #[test]
    fn test_all_errors_are_reported() {
        let mut config = ProxyConfig::default();
        config.listener.bind_address = "nonsense".to_string();
        config.upstream.base_url = "nonsense".to_string();
        config.observability.log_level = "loud".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
