//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeouts, body limits, request ID)
//! - Bind server to listener
//! - Stop accepting and drain on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::{MatchedPath, Request};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::http::handlers::{self, chain, mining, network, rpc, transactions, wallet};
use crate::http::request::{request_id, UuidRequestId, X_REQUEST_ID};
use crate::observability::metrics;
use crate::proxy::CommandProxy;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub proxy: Arc<CommandProxy>,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a server that runs real CLI processes.
    pub fn new(config: GatewayConfig) -> Self {
        let proxy = CommandProxy::from_config(&config);
        Self::with_proxy(config, proxy)
    }

    /// Create a server around an existing command proxy.
    pub fn with_proxy(config: GatewayConfig, proxy: CommandProxy) -> Self {
        let state = AppState {
            proxy: Arc::new(proxy),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            // Chain
            .route("/api/info", get(chain::info))
            .route("/api/block/{id}", get(chain::block))
            .route("/api/recentblocks", get(chain::recent_blocks))
            .route("/api/chainstate", get(chain::chainstate))
            .route("/api/chaintips", get(chain::chain_tips))
            .route("/api/deploymentinfo", get(chain::deployment_info))
            .route("/api/mempool", get(chain::mempool))
            .route("/api/rawmempool", get(chain::raw_mempool))
            .route("/api/debuginfo", get(chain::debug_info))
            .route("/api/rpcinfo", get(chain::rpc_info))
            .route("/api/uptime", get(chain::uptime))
            .route("/api/estimatesmartfee/{blocks}", get(chain::estimate_smart_fee))
            .route("/api/validateaddress/{address}", get(chain::validate_address))
            // Wallets
            .route("/api/wallets", get(wallet::wallets))
            .route("/api/createwallet", post(wallet::create_wallet))
            .route("/api/loadwallet", post(wallet::load_wallet))
            .route("/api/unloadwallet", post(wallet::unload_wallet))
            .route("/api/listwalletdir", get(wallet::list_wallet_dir))
            .route("/api/wallet/{name}", get(wallet::wallet_info))
            .route("/api/wallet/{name}/balance", get(wallet::balance))
            .route(
                "/api/wallet/{name}/newaddress",
                get(wallet::new_address).post(wallet::new_address),
            )
            .route("/api/wallet/{name}/transactions", get(wallet::transactions))
            .route("/api/wallet/{name}/utxos", get(wallet::utxos))
            .route("/api/wallet/{name}/addresses", get(wallet::addresses))
            .route(
                "/api/wallet/{name}/getaddressinfo/{address}",
                get(wallet::address_info),
            )
            .route("/api/wallet/{name}/send", post(wallet::send))
            .route("/api/wallet/{name}/importprivkey", post(wallet::import_privkey))
            .route("/api/wallet/{name}/rescanblockchain", post(wallet::rescan))
            .route("/api/wallet/{name}/signmessage", post(wallet::sign_message))
            .route("/api/wallet/{name}/dumpprivkey", post(wallet::dump_privkey))
            // Mining
            .route("/api/mining", get(mining::mining_info))
            .route("/api/mining/generate", post(mining::generate))
            .route("/api/mining/setgenerate", post(mining::set_generate))
            .route("/api/getblocktemplate", get(mining::block_template))
            // Network
            .route("/api/peers", get(network::peers))
            .route("/api/banned", get(network::banned))
            .route("/api/networkdetails", get(network::network_details))
            .route("/api/localaddresses", get(network::local_addresses))
            .route("/api/network/hashrate", get(network::hashrate))
            .route("/api/addnode", post(network::add_node))
            .route("/api/disconnectnode", post(network::disconnect_node))
            // Transactions
            .route("/api/decodetx", post(transactions::decode_tx))
            .route("/api/rawtx/{txid}", get(transactions::raw_tx))
            .route("/api/broadcast", post(transactions::broadcast))
            .route("/api/verifymessage", post(transactions::verify_message))
            // Passthrough
            .route("/api/rpc", post(rpc::execute))
            .route_layer(middleware::from_fn(track_requests))
            .fallback(not_found)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id(request),
                    )
                }),
            )
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
    }

    /// Run the server until the shutdown channel fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            cli = %self.config.cli.binary_path.display(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// A clone of the fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Count every routed request by its route template and final status.
async fn track_requests(request: Request, next: Next) -> Response {
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;
    metrics::record_request(&endpoint, response.status().as_u16());
    response
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "No such endpoint" })),
    )
}
