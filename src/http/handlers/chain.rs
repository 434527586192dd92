//! Blockchain state endpoints.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::http::handlers::positive_integer;
use crate::http::response::{composite, keyed, listing, payload, ApiResult};
use crate::http::server::AppState;
use crate::workflow::{self, MAX_RECENT_BLOCKS};

pub async fn info(State(state): State<AppState>) -> Json<Value> {
    let proxy = &state.proxy;
    composite([
        ("blockchain", proxy.call("getblockchaininfo", &[]).await),
        ("network", proxy.call("getnetworkinfo", &[]).await),
        ("mining", proxy.call("getmininginfo", &[]).await),
    ])
}

pub async fn chainstate(State(state): State<AppState>) -> Json<Value> {
    let proxy = &state.proxy;
    composite([
        ("blockchain", proxy.call("getblockchaininfo", &[]).await),
        ("txoutset", proxy.call("gettxoutsetinfo", &[]).await),
    ])
}

pub async fn debug_info(State(state): State<AppState>) -> Json<Value> {
    let proxy = &state.proxy;
    composite([
        ("blockchain", proxy.call("getblockchaininfo", &[]).await),
        ("network", proxy.call("getnetworkinfo", &[]).await),
        ("memory", proxy.call("getmemoryinfo", &[]).await),
    ])
}

pub async fn block(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    workflow::block_by_id(&state.proxy, &id).await.map(Json)
}

#[derive(Debug, Default, Deserialize)]
pub struct RecentBlocksQuery {
    pub count: Option<String>,
}

pub async fn recent_blocks(
    State(state): State<AppState>,
    Query(query): Query<RecentBlocksQuery>,
) -> ApiResult {
    let limit = match query.count.as_deref() {
        Some(count) => positive_integer(count, "count")?.min(MAX_RECENT_BLOCKS),
        None => MAX_RECENT_BLOCKS,
    };
    let blocks = workflow::recent_blocks(&state.proxy, limit).await?;
    Ok(Json(json!({ "blocks": blocks })))
}

pub async fn chain_tips(State(state): State<AppState>) -> ApiResult {
    listing("chaintips", state.proxy.call("getchaintips", &[]).await)
}

pub async fn deployment_info(State(state): State<AppState>) -> ApiResult {
    payload(state.proxy.call("getdeploymentinfo", &[]).await)
}

pub async fn mempool(State(state): State<AppState>) -> ApiResult {
    payload(state.proxy.call("getmempoolinfo", &[]).await)
}

pub async fn raw_mempool(State(state): State<AppState>) -> ApiResult {
    payload(state.proxy.call("getrawmempool", &["true"]).await)
}

pub async fn rpc_info(State(state): State<AppState>) -> ApiResult {
    payload(state.proxy.call("getrpcinfo", &[]).await)
}

pub async fn uptime(State(state): State<AppState>) -> ApiResult {
    keyed("uptime", state.proxy.call("uptime", &[]).await)
}

pub async fn estimate_smart_fee(
    State(state): State<AppState>,
    Path(blocks): Path<String>,
) -> ApiResult {
    let blocks = positive_integer(&blocks, "blocks")?.to_string();
    payload(state.proxy.call("estimatesmartfee", &[&blocks]).await)
}

pub async fn validate_address(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> ApiResult {
    payload(state.proxy.call("validateaddress", &[&address]).await)
}
