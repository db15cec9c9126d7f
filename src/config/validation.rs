//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and value ranges (timeouts > 0, limits > 0)
//! - Check template names are usable and distinct
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServiceConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid {field} address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("templates.glob must not be empty")]
    EmptyGlob,

    #[error("template name {0} must not be empty")]
    EmptyTemplateName(&'static str),

    #[error("templates.usage and templates.bootstrap both name {0:?}")]
    DuplicateTemplateName(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Validate a configuration, collecting every violation.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    let templates = &config.templates;
    if templates.glob.trim().is_empty() {
        errors.push(ValidationError::EmptyGlob);
    }
    if templates.usage.is_empty() {
        errors.push(ValidationError::EmptyTemplateName("templates.usage"));
    }
    if templates.bootstrap.is_empty() {
        errors.push(ValidationError::EmptyTemplateName("templates.bootstrap"));
    }
    if !templates.usage.is_empty() && templates.usage == templates.bootstrap {
        errors.push(ValidationError::DuplicateTemplateName(templates.usage.clone()));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }
    if config.security.max_body_size == 0 {
        errors.push(ValidationError::Zero("security.max_body_size"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
