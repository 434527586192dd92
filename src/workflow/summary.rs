//! Summary of the most recent blocks.
//!
//! A height whose hash or block cannot be fetched is left out; only failing
//! to read the chain tip fails the whole summary.

use serde::Serialize;
use serde_json::Value;

use crate::proxy::{CommandError, CommandProxy};

/// Upper bound on the number of blocks summarized per request.
pub const MAX_RECENT_BLOCKS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockSummary {
    pub height: u64,
    pub hash: String,
    pub time: u64,
    pub tx_count: usize,
    pub size: u64,
    pub weight: u64,
}

impl BlockSummary {
    fn from_block(height: u64, hash: String, block: &Value) -> Self {
        let field = |name: &str| block.get(name).and_then(Value::as_u64).unwrap_or(0);
        Self {
            height,
            hash,
            time: field("time"),
            tx_count: block
                .get("tx")
                .and_then(Value::as_array)
                .map_or(0, Vec::len),
            size: field("size"),
            weight: field("weight"),
        }
    }
}

/// Summarize up to `limit` blocks (capped at `MAX_RECENT_BLOCKS`), newest first.
pub async fn recent_blocks(
    proxy: &CommandProxy,
    limit: u64,
) -> Result<Vec<BlockSummary>, CommandError> {
    let info = proxy.call("getblockchaininfo", &[]).await.into_result()?;
    let tip = info
        .get("blocks")
        .and_then(Value::as_u64)
        .ok_or_else(|| CommandError::upstream("getblockchaininfo did not report a block height"))?;

    let count = limit.min(MAX_RECENT_BLOCKS).min(tip.saturating_add(1));
    let mut blocks = Vec::with_capacity(count as usize);
    if count == 0 {
        return Ok(blocks);
    }

    for height in (tip - (count - 1)..=tip).rev() {
        let height_arg = height.to_string();
        let resolved = proxy.call("getblockhash", &[&height_arg]).await;
        let Some(hash) = resolved.as_text().map(str::to_string) else {
            tracing::debug!(height, "Skipping block, hash lookup failed");
            continue;
        };

        match proxy.call("getblock", &[&hash]).await.into_result() {
            Ok(block) if block.is_object() => {
                blocks.push(BlockSummary::from_block(height, hash, &block));
            }
            _ => tracing::debug!(height, hash = %hash, "Skipping block, fetch failed"),
        }
    }

    Ok(blocks)
}
