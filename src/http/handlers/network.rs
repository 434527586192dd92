//! Peer and network endpoints.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::http::handlers::required;
use crate::http::request::JsonBody;
use crate::http::response::{composite, keyed, listing, ApiResult};
use crate::http::server::AppState;
use crate::proxy::{CommandError, CommandResult};

pub async fn peers(State(state): State<AppState>) -> ApiResult {
    listing("peers", state.proxy.call("getpeerinfo", &[]).await)
}

pub async fn banned(State(state): State<AppState>) -> ApiResult {
    listing("banned", state.proxy.call("listbanned", &[]).await)
}

pub async fn network_details(State(state): State<AppState>) -> Json<Value> {
    let proxy = &state.proxy;
    composite([
        ("network", proxy.call("getnetworkinfo", &[]).await),
        ("nettotals", proxy.call("getnettotals", &[]).await),
    ])
}

pub async fn local_addresses(State(state): State<AppState>) -> ApiResult {
    let addresses = match state.proxy.call("getnetworkinfo", &[]).await {
        CommandResult::Failed(err) => return Err(err),
        CommandResult::Decoded(info) => info
            .get("localaddresses")
            .cloned()
            .unwrap_or_else(|| json!([])),
        CommandResult::PlainText(_) => json!([]),
    };
    Ok(Json(json!({ "localaddresses": addresses })))
}

pub async fn hashrate(State(state): State<AppState>) -> ApiResult {
    keyed("hashrate", state.proxy.call("getnetworkhashps", &[]).await)
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AddNodeRequest {
    pub node: String,
    pub command: String,
}

impl Default for AddNodeRequest {
    fn default() -> Self {
        Self {
            node: String::new(),
            command: "add".to_string(),
        }
    }
}

pub async fn add_node(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<AddNodeRequest>,
) -> ApiResult {
    let node = required(&body.node, "No node address provided")?;
    let command = body.command.trim();
    if !matches!(command, "add" | "remove" | "onetry") {
        return Err(CommandError::validation(format!(
            "Invalid addnode command '{}': expected add, remove or onetry",
            command
        )));
    }
    keyed("result", state.proxy.call("addnode", &[node, command]).await)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DisconnectNodeRequest {
    pub address: String,
}

pub async fn disconnect_node(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DisconnectNodeRequest>,
) -> ApiResult {
    let address = required(&body.address, "No address provided")?;
    keyed("result", state.proxy.call("disconnectnode", &[address]).await)
}
