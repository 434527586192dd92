//! Single-command proxy.
//!
//! # Data Flow
//! ```text
//! CommandRequest
//!     → validate (method name)
//!     → argv: [-datadir=<dir>] [-rpcwallet=<name>] <method> <args...>
//!     → ProcessInvoker::invoke (deadline from the request or config)
//!     → decoder::decode
//!     → CommandResult
//! ```
//!
//! Global flags must precede the method name; the CLI is positional.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::{CliConfig, GatewayConfig, TimeoutConfig};
use crate::observability::metrics;
use crate::proxy::decoder::{decode, CommandError, CommandResult};
use crate::proxy::invoker::{ProcessInvoker, SystemInvoker};

/// One invocation of the node CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    pub method: String,
    pub args: Vec<String>,
    pub wallet: Option<String>,
    /// Falls back to the interactive deadline when unset.
    pub timeout: Option<Duration>,
    /// Caller-supplied method name; metrics label it as `passthrough`.
    pub passthrough: bool,
}

impl CommandRequest {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            args: Vec::new(),
            wallet: None,
            timeout: None,
            passthrough: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Scope the command to a named wallet. The empty name is the node's
    /// default wallet.
    pub fn wallet(mut self, wallet: impl Into<String>) -> Self {
        self.wallet = Some(wallet.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn passthrough(mut self) -> Self {
        self.passthrough = true;
        self
    }

    fn metrics_label(&self) -> &str {
        if self.passthrough {
            "passthrough"
        } else {
            &self.method
        }
    }

    fn validate(&self) -> Result<(), CommandError> {
        if self.method.trim().is_empty() {
            return Err(CommandError::validation("No command provided"));
        }
        // A leading `-` would be read by the CLI as a global flag.
        if self.method.starts_with('-') || self.method.chars().any(char::is_whitespace) {
            return Err(CommandError::validation(format!(
                "Invalid command name '{}'",
                self.method
            )));
        }
        Ok(())
    }
}

/// Runs node CLI commands and decodes their output.
///
/// Holds only start-time configuration; cheap to share behind an `Arc`.
#[derive(Clone)]
pub struct CommandProxy {
    binary_path: PathBuf,
    data_dir: Option<PathBuf>,
    timeouts: TimeoutConfig,
    invoker: Arc<dyn ProcessInvoker>,
}

impl CommandProxy {
    pub fn new(cli: CliConfig, timeouts: TimeoutConfig, invoker: Arc<dyn ProcessInvoker>) -> Self {
        Self {
            binary_path: cli.binary_path,
            data_dir: cli.data_dir,
            timeouts,
            invoker,
        }
    }

    /// Proxy that spawns real processes.
    pub fn from_config(config: &GatewayConfig) -> Self {
        Self::new(
            config.cli.clone(),
            config.timeouts.clone(),
            Arc::new(SystemInvoker),
        )
    }

    pub fn timeouts(&self) -> &TimeoutConfig {
        &self.timeouts
    }

    /// Build the argument vector for a request: global flags, method, args.
    pub fn argv(&self, request: &CommandRequest) -> Vec<String> {
        let mut argv = Vec::with_capacity(request.args.len() + 3);
        if let Some(dir) = &self.data_dir {
            argv.push(format!("-datadir={}", dir.display()));
        }
        if let Some(wallet) = &request.wallet {
            argv.push(format!("-rpcwallet={}", wallet));
        }
        argv.push(request.method.clone());
        argv.extend(request.args.iter().cloned());
        argv
    }

    /// Validate, run and decode a single command.
    pub async fn run(&self, request: &CommandRequest) -> CommandResult {
        if let Err(err) = request.validate() {
            tracing::debug!(command = %request.method, error = %err, "Rejected command");
            return CommandResult::Failed(err);
        }

        let timeout = request.timeout.unwrap_or_else(|| self.timeouts.interactive());
        let argv = self.argv(request);
        let start = Instant::now();

        let outcome = self.invoker.invoke(&self.binary_path, &argv, timeout).await;
        let result = decode(outcome);

        let outcome_label = match &result {
            CommandResult::Decoded(_) | CommandResult::PlainText(_) => "ok",
            CommandResult::Failed(err) => err.kind.as_str(),
        };
        metrics::record_command(request.metrics_label(), outcome_label, start);

        match &result {
            CommandResult::Failed(err) => tracing::warn!(
                command = %request.method,
                wallet = request.wallet.as_deref().unwrap_or(""),
                kind = err.kind.as_str(),
                error = %err,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Command failed"
            ),
            _ => tracing::debug!(
                command = %request.method,
                wallet = request.wallet.as_deref().unwrap_or(""),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Command completed"
            ),
        }

        result
    }

    /// Run an unscoped command with the interactive deadline.
    pub async fn call(&self, method: &str, args: &[&str]) -> CommandResult {
        self.run(&CommandRequest::new(method).args(args.iter().copied()))
            .await
    }

    /// Run a wallet-scoped command with the interactive deadline.
    pub async fn call_wallet(&self, wallet: &str, method: &str, args: &[&str]) -> CommandResult {
        self.run(
            &CommandRequest::new(method)
                .wallet(wallet)
                .args(args.iter().copied()),
        )
        .await
    }
}

impl std::fmt::Debug for CommandProxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandProxy")
            .field("binary_path", &self.binary_path)
            .field("data_dir", &self.data_dir)
            .field("timeouts", &self.timeouts)
            .finish()
    }
}
