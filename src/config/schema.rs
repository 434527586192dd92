//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// The node's command-line tool and where it keeps its data.
    pub cli: CliConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    #[serde(default)]
    pub security: SecurityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:5999").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5999".to_string(),
        }
    }
}

/// Command-line tool configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CliConfig {
    /// Path to the node's CLI executable.
    pub binary_path: PathBuf,

    /// Data directory passed as `-datadir=<path>`. When unset the flag is
    /// omitted and the CLI falls back to its own default.
    pub data_dir: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            binary_path: PathBuf::from("coral-cli"),
            data_dir: None,
        }
    }
}

/// Timeout configuration for command classes and the HTTP request itself.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Interactive queries (info, balances, lookups) in seconds.
    pub command_secs: u64,

    /// Outgoing transfers in seconds.
    pub send_secs: u64,

    /// Private key import, which may trigger a rescan, in seconds.
    pub import_secs: u64,

    /// Full blockchain rescan in seconds.
    pub rescan_secs: u64,

    /// Whole HTTP request deadline in seconds. Must outlast every command class.
    pub request_secs: u64,
}

impl TimeoutConfig {
    pub fn interactive(&self) -> Duration {
        Duration::from_secs(self.command_secs)
    }

    pub fn send(&self) -> Duration {
        Duration::from_secs(self.send_secs)
    }

    pub fn import(&self) -> Duration {
        Duration::from_secs(self.import_secs)
    }

    pub fn rescan(&self) -> Duration {
        Duration::from_secs(self.rescan_secs)
    }

    /// Longest deadline any single command may be given.
    pub fn longest_command_secs(&self) -> u64 {
        self.command_secs
            .max(self.send_secs)
            .max(self.import_secs)
            .max(self.rescan_secs)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            command_secs: 30,
            send_secs: 60,
            import_secs: 300,
            rescan_secs: 600,
            request_secs: 660,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// Request hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 64 * 1024, // 64KB
        }
    }
}
