//! Free-form command passthrough.
//!
//! The command line is split on whitespace, so an argument containing spaces
//! cannot be expressed. JSON arguments must be written without spaces.

use axum::extract::State;
use serde::Deserialize;

use crate::http::handlers::required;
use crate::http::request::JsonBody;
use crate::http::response::{keyed, ApiResult};
use crate::http::server::AppState;
use crate::proxy::{CommandError, CommandRequest};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RpcRequest {
    pub command: String,
}

/// Split a command line into a request: first word is the method.
pub fn parse_command_line(line: &str) -> Option<CommandRequest> {
    let mut parts = line.split_whitespace();
    let method = parts.next()?;
    Some(CommandRequest::new(method).args(parts))
}

pub async fn execute(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RpcRequest>,
) -> ApiResult {
    let line = required(&body.command, "No command provided")?;
    let request = parse_command_line(line)
        .ok_or_else(|| CommandError::validation("Empty command"))?
        .passthrough();

    tracing::info!(command = %request.method, args = request.args.len(), "Passthrough command");
    keyed("result", state.proxy.run(&request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_line() {
        let request = parse_command_line("  getblockhash   42 ").unwrap();
        assert_eq!(request.method, "getblockhash");
        assert_eq!(request.args, vec!["42"]);
        assert!(request.wallet.is_none());
        assert!(!request.passthrough);
    }

    #[test]
    fn test_parse_empty_line() {
        assert!(parse_command_line(" \t ").is_none());
    }
}
