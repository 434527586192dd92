//! Mine blocks to an explicit address or to a fresh address of the first
//! loaded wallet.

use serde::Serialize;
use serde_json::Value;

use crate::proxy::{CommandError, CommandProxy, CommandResult};

/// Result of a mining request together with the address that was paid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MiningOutcome {
    pub result: Value,
    pub address: String,
}

pub async fn mine_to_address(
    proxy: &CommandProxy,
    blocks: u64,
    address: Option<&str>,
) -> Result<MiningOutcome, CommandError> {
    let address = match address.map(str::trim).filter(|a| !a.is_empty()) {
        Some(address) => address.to_string(),
        None => {
            let wallet = first_loaded_wallet(proxy).await?;
            let fresh = proxy.call_wallet(&wallet, "getnewaddress", &[]).await;
            match fresh.as_text() {
                Some(address) => address.to_string(),
                None => {
                    return Err(match fresh.into_result() {
                        Err(err) => {
                            let detail = format!("Could not get address: {}", err.detail);
                            err.with_detail(detail)
                        }
                        Ok(value) => CommandError::upstream(format!(
                            "Could not get address: unexpected response {}",
                            value
                        )),
                    });
                }
            }
        }
    };

    tracing::info!(blocks, address = %address, "Generating blocks");
    let blocks = blocks.to_string();
    let result = proxy
        .call("generatetoaddress", &[&blocks, &address])
        .await
        .into_result()?;

    Ok(MiningOutcome { result, address })
}

async fn first_loaded_wallet(proxy: &CommandProxy) -> Result<String, CommandError> {
    match proxy.call("listwallets", &[]).await {
        CommandResult::Failed(err) => {
            let detail = format!("No wallet loaded. {}. Create a wallet first.", err.detail);
            Err(err.with_detail(detail))
        }
        CommandResult::Decoded(Value::Array(wallets)) => wallets
            .into_iter()
            .find_map(|w| w.as_str().map(str::to_string))
            .ok_or_else(|| CommandError::upstream("No wallet loaded. Create a wallet first.")),
        _ => Err(CommandError::upstream(
            "No wallet loaded. Unexpected listwallets response. Create a wallet first.",
        )),
    }
}
