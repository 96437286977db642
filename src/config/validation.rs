//! Configuration validation.
//!
//! Serde handles syntax; this checks values. All errors are collected,
//! not just the first.

use std::fmt;

use url::Url;

use crate::config::schema::SessionConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyNodePool,
    InvalidNodeUrl { url: String, reason: String },
    ZeroTtl,
    EmptyOperation,
    ZeroNameRange,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyNodePool => write!(f, "node.node_url_pool is empty"),
            ValidationError::InvalidNodeUrl { url, reason } => {
                write!(f, "invalid node URL '{}': {}", url, reason)
            }
            ValidationError::ZeroTtl => write!(f, "login.ttl_secs must be greater than 0"),
            ValidationError::EmptyOperation => write!(f, "registration.operation is empty"),
            ValidationError::ZeroNameRange => {
                write!(f, "registration.name_range must be greater than 0")
            }
        }
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &SessionConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.node.node_url_pool.is_empty() {
        errors.push(ValidationError::EmptyNodePool);
    }
    for raw in &config.node.node_url_pool {
        match Url::parse(raw) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => errors.push(ValidationError::InvalidNodeUrl {
                url: raw.clone(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            }),
            Err(e) => errors.push(ValidationError::InvalidNodeUrl {
                url: raw.clone(),
                reason: e.to_string(),
            }),
        }
    }

    if config.login.ttl_secs == 0 {
        errors.push(ValidationError::ZeroTtl);
    }
    if config.registration.operation.trim().is_empty() {
        errors.push(ValidationError::EmptyOperation);
    }
    if config.registration.name_range == 0 {
        errors.push(ValidationError::ZeroNameRange);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
