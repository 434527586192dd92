//! Endpoint handlers, grouped by the part of the node they expose.
//!
//! Every handler validates its input before running any command and returns
//! either the node's payload or a `CommandError` rendered as JSON.

pub mod chain;
pub mod mining;
pub mod network;
pub mod rpc;
pub mod transactions;
pub mod wallet;

use axum::Json;
use serde::Serialize;

use crate::proxy::CommandError;

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Trimmed non-empty string field, or a validation error with `message`.
pub(crate) fn required<'a>(value: &'a str, message: &str) -> Result<&'a str, CommandError> {
    let value = value.trim();
    if value.is_empty() {
        Err(CommandError::validation(message))
    } else {
        Ok(value)
    }
}

/// Positive integer given as a path segment or query value.
pub(crate) fn positive_integer(value: &str, field: &str) -> Result<u64, CommandError> {
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CommandError::validation(format!(
            "{} must be a positive integer",
            field
        ))),
    }
}
