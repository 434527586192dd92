//! Raw transaction and message verification endpoints.

use axum::extract::{Path, State};
use serde::Deserialize;

use crate::http::handlers::required;
use crate::http::request::JsonBody;
use crate::http::response::{keyed, payload, ApiResult};
use crate::http::server::AppState;
use crate::proxy::CommandError;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawTxRequest {
    pub rawtx: String,
}

pub async fn decode_tx(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RawTxRequest>,
) -> ApiResult {
    let rawtx = required(&body.rawtx, "No raw transaction provided")?;
    payload(state.proxy.call("decoderawtransaction", &[rawtx]).await)
}

pub async fn raw_tx(State(state): State<AppState>, Path(txid): Path<String>) -> ApiResult {
    payload(state.proxy.call("getrawtransaction", &[&txid, "1"]).await)
}

pub async fn broadcast(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RawTxRequest>,
) -> ApiResult {
    let rawtx = required(&body.rawtx, "No raw transaction provided")?;
    keyed("txid", state.proxy.call("sendrawtransaction", &[rawtx]).await)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VerifyMessageRequest {
    pub address: String,
    pub signature: String,
    pub message: String,
}

pub async fn verify_message(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<VerifyMessageRequest>,
) -> ApiResult {
    const MISSING: &str = "Address, signature, and message required";
    let address = required(&body.address, MISSING)?;
    let signature = required(&body.signature, MISSING)?;
    if body.message.is_empty() {
        return Err(CommandError::validation(MISSING));
    }
    keyed(
        "valid",
        state
            .proxy
            .call("verifymessage", &[address, signature, &body.message])
            .await,
    )
}
