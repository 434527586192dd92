//! Mining endpoints.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::http::request::JsonBody;
use crate::http::response::{payload, ApiResult};
use crate::http::server::AppState;
use crate::proxy::CommandError;
use crate::workflow;

pub async fn mining_info(State(state): State<AppState>) -> ApiResult {
    payload(state.proxy.call("getmininginfo", &[]).await)
}

pub async fn block_template(State(state): State<AppState>) -> ApiResult {
    payload(
        state
            .proxy
            .call("getblocktemplate", &[r#"{"rules":["segwit"]}"#])
            .await,
    )
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GenerateRequest {
    pub blocks: Option<u64>,
    pub address: Option<String>,
}

pub async fn generate(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<GenerateRequest>,
) -> ApiResult {
    let blocks = body.blocks.unwrap_or(1);
    if blocks == 0 {
        return Err(CommandError::validation("blocks must be a positive integer"));
    }
    let outcome = workflow::mine_to_address(&state.proxy, blocks, body.address.as_deref()).await?;
    Ok(Json(json!(outcome)))
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SetGenerateRequest {
    pub generate: bool,
    /// `-1` lets the node use every core.
    pub threads: i64,
}

impl Default for SetGenerateRequest {
    fn default() -> Self {
        Self {
            generate: false,
            threads: 1,
        }
    }
}

pub async fn set_generate(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<SetGenerateRequest>,
) -> ApiResult {
    let result = if body.generate {
        if body.threads == 0 || body.threads < -1 {
            return Err(CommandError::validation(
                "threads must be a positive integer or -1",
            ));
        }
        let threads = body.threads.to_string();
        state.proxy.call("setgenerate", &["true", &threads]).await
    } else {
        state.proxy.call("setgenerate", &["false"]).await
    };

    let result = result.into_result()?;
    Ok(Json(json!({ "result": result, "generating": body.generate })))
}
