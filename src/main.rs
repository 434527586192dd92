//! Coral Gateway (v1)
//!
//! JSON-over-HTTP front end for the Coral node's command-line interface.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request          ┌──────────────────────────────────────────────┐
//!     ────────────────────────┼─▶ http (axum router, validation)             │
//!                             │        │                                     │
//!                             │        ▼                                     │
//!                             │   workflow (block lookup, mining, summary)   │
//!                             │        │                                     │
//!                             │        ▼                                     │
//!                             │   proxy::command (argv, deadline)            │
//!                             │        │                                     │
//!                             │        ▼                                     │
//!                             │   proxy::invoker ──────────────────────────┼──▶ coral-cli
//!                             │        │                                     │
//!                             │        ▼                                     │
//!     Client Response         │   proxy::decoder (JSON / text / error)       │
//!     ◀───────────────────────┼── http::response                             │
//!                             └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use coral_gateway::config::{load_config, validate_config, ConfigError, GatewayConfig};
use coral_gateway::lifecycle;
use coral_gateway::observability::logging;

#[derive(Parser)]
#[command(name = "coral-gateway", version)]
#[command(about = "JSON gateway for the Coral node command-line interface", long_about = None)]
struct Args {
    /// TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(long)]
    bind: Option<String>,

    /// Override cli.binary_path.
    #[arg(long)]
    cli: Option<PathBuf>,

    /// Override cli.data_dir.
    #[arg(long)]
    datadir: Option<PathBuf>,
}

impl Args {
    fn apply(self, config: &mut GatewayConfig) {
        if let Some(bind) = self.bind {
            config.listener.bind_address = bind;
        }
        if let Some(cli) = self.cli {
            config.cli.binary_path = cli;
        }
        if let Some(datadir) = self.datadir {
            config.cli.data_dir = Some(datadir);
        }
    }
}

/// File (or defaults), then command-line overrides, then validation.
fn resolve_config(args: Args) -> Result<GatewayConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };
    args.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = resolve_config(Args::parse())?;

    logging::init_logging(&config.observability);

    tracing::info!("coral-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        cli = %config.cli.binary_path.display(),
        data_dir = ?config.cli.data_dir,
        command_timeout_secs = config.timeouts.command_secs,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    lifecycle::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
