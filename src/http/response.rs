//! Response rendering.
//!
//! # Responsibilities
//! - Render `CommandResult` payloads as JSON
//! - Map `CommandError` kinds to HTTP status codes
//!
//! # Design Decisions
//! - Every error body is `{"error": <detail>, "kind": <kind>}`
//! - Caller mistakes are 400; a timed-out command is 504 Gateway Timeout
//! - A missing CLI binary is 503; a CLI-reported failure is 502

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{Map, Value};

use crate::proxy::{CommandError, CommandResult, ErrorKind};

/// Handler return type.
pub type ApiResult = Result<Json<Value>, CommandError>;

impl CommandError {
    pub fn status(&self) -> StatusCode {
        match self.kind {
            ErrorKind::ValidationError => StatusCode::BAD_REQUEST,
            ErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ErrorKind::InvocationError => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::ProcessError | ErrorKind::UpstreamError => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for CommandError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.to_json())).into_response()
    }
}

/// The collaborator's payload as-is.
pub fn payload(result: CommandResult) -> ApiResult {
    result.into_result().map(Json)
}

/// The payload under a single key, e.g. `{"txid": ...}`.
pub fn keyed(key: &str, result: CommandResult) -> ApiResult {
    let value = result.into_result()?;
    Ok(Json(object([(key, value)])))
}

/// A list payload under `key`; any non-list success renders as `[]`.
pub fn listing(key: &str, result: CommandResult) -> ApiResult {
    let value = match result.into_result()? {
        list @ Value::Array(_) => list,
        _ => Value::Array(Vec::new()),
    };
    Ok(Json(object([(key, value)])))
}

/// Several independent results, each rendered in its own slot.
pub fn composite<const N: usize>(parts: [(&str, CommandResult); N]) -> Json<Value> {
    Json(object(parts.map(|(key, result)| (key, result.into_value()))))
}

/// Replace a timeout's detail for work that may continue after the deadline.
pub fn on_timeout(result: CommandResult, detail: &str) -> CommandResult {
    match result {
        CommandResult::Failed(err) if err.kind == ErrorKind::Timeout => {
            CommandResult::Failed(err.with_detail(detail))
        }
        other => other,
    }
}

fn object<'a>(entries: impl IntoIterator<Item = (&'a str, Value)>) -> Value {
    let map: Map<String, Value> = entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    Value::Object(map)
}
