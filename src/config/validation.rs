//! Configuration validation.
//!
//! Semantic checks only; serde handles syntax. All problems are reported at
//! once rather than stopping at the first.

use crate::config::schema::AppConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let endpoint = config.exchange.endpoint();
    match url::Url::parse(endpoint) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            "exchange.api_url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(
            "exchange.api_url",
            format!("invalid URL '{}': {}", endpoint, e),
        )),
    }

    if config.exchange.request_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "exchange.request_timeout_secs",
            "must be greater than zero",
        ));
    }

    if config.exchange.expiration_window_ms == 0 {
        errors.push(ValidationError::new(
            "exchange.expiration_window_ms",
            "must be greater than zero",
        ));
    }

    let var = &config.credentials.private_key_env;
    if var.is_empty() || var.contains('=') || var.contains('\0') {
        errors.push(ValidationError::new(
            "credentials.private_key_env",
            format!("'{}' is not a valid environment variable name", var),
        ));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown level '{}'", config.observability.log_level),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
