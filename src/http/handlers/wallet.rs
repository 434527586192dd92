//! Wallet endpoints.
//!
//! Wallet-scoped commands carry `-rpcwallet=<name>` from the path segment.
//! Key import and rescans run with their own, much longer deadlines.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::http::handlers::required;
use crate::http::request::JsonBody;
use crate::http::response::{keyed, listing, on_timeout, payload, ApiResult};
use crate::http::server::AppState;
use crate::proxy::{CommandError, CommandRequest, CommandResult};

pub async fn wallets(State(state): State<AppState>) -> ApiResult {
    listing("wallets", state.proxy.call("listwallets", &[]).await)
}

pub async fn wallet_info(State(state): State<AppState>, Path(name): Path<String>) -> ApiResult {
    payload(state.proxy.call_wallet(&name, "getwalletinfo", &[]).await)
}

pub async fn balance(State(state): State<AppState>, Path(name): Path<String>) -> ApiResult {
    let balance = match state.proxy.call_wallet(&name, "getbalance", &[]).await {
        CommandResult::Failed(err) => return Err(err),
        CommandResult::Decoded(Value::Number(n)) => n.as_f64(),
        CommandResult::Decoded(Value::String(text)) | CommandResult::PlainText(text) => {
            text.trim().parse::<f64>().ok()
        }
        CommandResult::Decoded(_) => None,
    };
    let balance = balance
        .ok_or_else(|| CommandError::upstream("getbalance did not return a number"))?;
    Ok(Json(json!({ "balance": balance })))
}

pub async fn new_address(State(state): State<AppState>, Path(name): Path<String>) -> ApiResult {
    keyed("address", state.proxy.call_wallet(&name, "getnewaddress", &[]).await)
}

pub async fn transactions(State(state): State<AppState>, Path(name): Path<String>) -> ApiResult {
    keyed(
        "transactions",
        state
            .proxy
            .call_wallet(&name, "listtransactions", &["*", "20"])
            .await,
    )
}

pub async fn utxos(State(state): State<AppState>, Path(name): Path<String>) -> ApiResult {
    keyed("utxos", state.proxy.call_wallet(&name, "listunspent", &[]).await)
}

pub async fn addresses(State(state): State<AppState>, Path(name): Path<String>) -> ApiResult {
    keyed(
        "addresses",
        state
            .proxy
            .call_wallet(&name, "listreceivedbyaddress", &["0", "true"])
            .await,
    )
}

pub async fn address_info(
    State(state): State<AppState>,
    Path((name, address)): Path<(String, String)>,
) -> ApiResult {
    payload(
        state
            .proxy
            .call_wallet(&name, "getaddressinfo", &[&address])
            .await,
    )
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SendRequest {
    pub address: String,
    /// Number or numeric string; passed to the CLI verbatim once validated.
    pub amount: Option<Value>,
}

/// Validate a transfer amount and return the text handed to the CLI.
pub fn parse_amount(amount: Option<&Value>) -> Result<String, CommandError> {
    let text = match amount {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.trim().to_string(),
        _ => return Err(CommandError::validation("Invalid amount")),
    };
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(text),
        _ => Err(CommandError::validation("Invalid amount")),
    }
}

pub async fn send(
    State(state): State<AppState>,
    Path(name): Path<String>,
    JsonBody(body): JsonBody<SendRequest>,
) -> ApiResult {
    let address = required(&body.address, "No address provided")?;
    let amount = parse_amount(body.amount.as_ref())?;

    let request = CommandRequest::new("sendtoaddress")
        .wallet(name.as_str())
        .args([address, amount.as_str()])
        .timeout(state.proxy.timeouts().send());
    keyed("txid", state.proxy.run(&request).await)
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ImportKeyRequest {
    pub privkey: String,
    pub label: String,
    pub rescan: bool,
}

impl Default for ImportKeyRequest {
    fn default() -> Self {
        Self {
            privkey: String::new(),
            label: String::new(),
            rescan: true,
        }
    }
}

pub async fn import_privkey(
    State(state): State<AppState>,
    Path(name): Path<String>,
    JsonBody(body): JsonBody<ImportKeyRequest>,
) -> ApiResult {
    let privkey = required(&body.privkey, "No private key provided")?;
    let rescan = if body.rescan { "true" } else { "false" };

    let request = CommandRequest::new("importprivkey")
        .wallet(name.as_str())
        .args([privkey, body.label.as_str(), rescan])
        .timeout(state.proxy.timeouts().import());
    let result = on_timeout(
        state.proxy.run(&request).await,
        "Import timed out (rescan may still be in progress)",
    );

    result.into_result()?;
    Ok(Json(json!({
        "success": true,
        "message": "Private key imported successfully",
    })))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RescanRequest {
    pub start_height: u64,
}

pub async fn rescan(
    State(state): State<AppState>,
    Path(name): Path<String>,
    JsonBody(body): JsonBody<RescanRequest>,
) -> ApiResult {
    let request = CommandRequest::new("rescanblockchain")
        .wallet(name.as_str())
        .arg(body.start_height.to_string())
        .timeout(state.proxy.timeouts().rescan());
    payload(on_timeout(
        state.proxy.run(&request).await,
        "Rescan timed out (may still be in progress)",
    ))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignMessageRequest {
    pub address: String,
    pub message: String,
}

pub async fn sign_message(
    State(state): State<AppState>,
    Path(name): Path<String>,
    JsonBody(body): JsonBody<SignMessageRequest>,
) -> ApiResult {
    const MISSING: &str = "Address and message required";
    let address = required(&body.address, MISSING)?;
    if body.message.is_empty() {
        return Err(CommandError::validation(MISSING));
    }
    keyed(
        "signature",
        state
            .proxy
            .call_wallet(&name, "signmessage", &[address, &body.message])
            .await,
    )
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DumpKeyRequest {
    pub address: String,
}

pub async fn dump_privkey(
    State(state): State<AppState>,
    Path(name): Path<String>,
    JsonBody(body): JsonBody<DumpKeyRequest>,
) -> ApiResult {
    let address = required(&body.address, "No address provided")?;
    keyed(
        "privkey",
        state.proxy.call_wallet(&name, "dumpprivkey", &[address]).await,
    )
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CreateWalletRequest {
    pub name: String,
}

impl Default for CreateWalletRequest {
    fn default() -> Self {
        Self {
            name: "wallet".to_string(),
        }
    }
}

pub async fn create_wallet(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateWalletRequest>,
) -> ApiResult {
    let name = required(&body.name, "No wallet name provided")?;
    // Legacy (non-descriptor) wallet: no private-key disable, not blank, no
    // passphrase, no avoid-reuse, no descriptors.
    payload(
        state
            .proxy
            .call("createwallet", &[name, "false", "false", "", "false", "false"])
            .await,
    )
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WalletNameRequest {
    pub name: String,
}

pub async fn load_wallet(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<WalletNameRequest>,
) -> ApiResult {
    let name = required(&body.name, "No wallet name provided")?;
    payload(state.proxy.call("loadwallet", &[name]).await)
}

pub async fn unload_wallet(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<WalletNameRequest>,
) -> ApiResult {
    let name = required(&body.name, "No wallet name provided")?;
    payload(state.proxy.call("unloadwallet", &[name]).await)
}

pub async fn list_wallet_dir(State(state): State<AppState>) -> ApiResult {
    payload(state.proxy.call("listwalletdir", &[]).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_accepts_numbers_and_strings() {
        assert_eq!(parse_amount(Some(&json!(1.5))), Ok("1.5".to_string()));
        assert_eq!(parse_amount(Some(&json!("0.001"))), Ok("0.001".to_string()));
        assert_eq!(parse_amount(Some(&json!(3))), Ok("3".to_string()));
    }

    #[test]
    fn test_parse_amount_rejects_non_positive() {
        let rejected = [
            json!(0),
            json!(-1),
            json!("0"),
            json!("-0.5"),
            json!("abc"),
            json!(null),
            json!("NaN"),
        ];
        for amount in rejected {
            let err = parse_amount(Some(&amount)).unwrap_err();
            assert_eq!(err.detail, "Invalid amount", "amount {}", amount);
        }
        assert!(parse_amount(None).is_err());
    }
}
