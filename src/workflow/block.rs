//! Block lookup by height or hash.

use serde_json::Value;

use crate::proxy::{CommandError, CommandProxy};

/// True when the identifier should be treated as a block height.
pub fn is_height(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}

/// Fetch a block by height (resolved to a hash first) or by hash.
pub async fn block_by_id(proxy: &CommandProxy, id: &str) -> Result<Value, CommandError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(CommandError::validation("No block height or hash provided"));
    }

    let hash = if is_height(id) {
        let resolved = proxy.call("getblockhash", &[id]).await;
        match resolved.as_text() {
            Some(hash) => hash.to_string(),
            None => {
                let value = resolved.into_result()?;
                return Err(CommandError::upstream(format!(
                    "getblockhash returned an unexpected value: {}",
                    value
                )));
            }
        }
    } else {
        id.to_string()
    };

    tracing::debug!(id = %id, hash = %hash, "Fetching block");
    proxy.call("getblock", &[&hash]).await.into_result()
}
