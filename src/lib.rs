//! Coral node JSON gateway library.
//!
//! Exposes the node's command-line RPC surface as JSON endpoints by running
//! the CLI once per command and decoding what it prints.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;
pub mod workflow;

pub use config::schema::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use proxy::{CommandProxy, CommandRequest, CommandResult};
