//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Ensure the HTTP deadline outlasts every command deadline
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    InvalidBindAddress(String),

    #[error("observability.metrics_address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),

    #[error("cli.binary_path must not be empty")]
    EmptyBinaryPath,

    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error(
        "timeouts.request_secs ({request}) must exceed the longest command timeout ({longest})"
    )]
    RequestDeadlineTooShort { request: u64, longest: u64 },

    #[error("security.max_body_size must be greater than zero")]
    ZeroBodyLimit,
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.cli.binary_path.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyBinaryPath);
    }

    let timeouts = &config.timeouts;
    for (name, secs) in [
        ("command_secs", timeouts.command_secs),
        ("send_secs", timeouts.send_secs),
        ("import_secs", timeouts.import_secs),
        ("rescan_secs", timeouts.rescan_secs),
        ("request_secs", timeouts.request_secs),
    ] {
        if secs == 0 {
            errors.push(ValidationError::ZeroTimeout(name));
        }
    }

    let longest = timeouts.longest_command_secs();
    if timeouts.request_secs != 0 && timeouts.request_secs <= longest {
        errors.push(ValidationError::RequestDeadlineTooShort {
            request: timeouts.request_secs,
            longest,
        });
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
