//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpListener;

use coral_gateway::config::{CliConfig, GatewayConfig, TimeoutConfig};
use coral_gateway::lifecycle::Shutdown;
use coral_gateway::proxy::{CommandProxy, ProcessInvoker, RawOutcome};
use coral_gateway::HttpServer;

pub const TEST_DATADIR: &str = "/tmp/coral-test";

/// One recorded CLI invocation, split back into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub argv: Vec<String>,
    pub wallet: Option<String>,
    pub method: String,
    pub args: Vec<String>,
    pub timeout: Duration,
}

impl Call {
    fn parse(argv: &[String], timeout: Duration) -> Self {
        let mut wallet = None;
        let mut rest = argv.iter();
        let mut method = String::new();
        for arg in rest.by_ref() {
            if let Some(name) = arg.strip_prefix("-rpcwallet=") {
                wallet = Some(name.to_string());
            } else if arg.starts_with("-datadir=") {
                continue;
            } else {
                method = arg.clone();
                break;
            }
        }
        Self {
            argv: argv.to_vec(),
            wallet,
            method,
            args: rest.cloned().collect(),
            timeout,
        }
    }

    pub fn arg(&self, i: usize) -> &str {
        self.args.get(i).map(String::as_str).unwrap_or("")
    }
}

type Script = dyn Fn(&Call) -> RawOutcome + Send + Sync;

/// Fake CLI: answers from a script and records every call.
pub struct ScriptedInvoker {
    calls: Mutex<Vec<Call>>,
    script: Box<Script>,
}

impl ScriptedInvoker {
    pub fn new<F>(script: F) -> Arc<Self>
    where
        F: Fn(&Call) -> RawOutcome + Send + Sync + 'static,
    {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            script: Box::new(script),
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn methods(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.method).collect()
    }
}

#[async_trait]
impl ProcessInvoker for ScriptedInvoker {
    async fn invoke(&self, _executable: &Path, argv: &[String], timeout: Duration) -> RawOutcome {
        let call = Call::parse(argv, timeout);
        let outcome = (self.script)(&call);
        self.calls.lock().unwrap().push(call);
        outcome
    }
}

pub fn ok(stdout: &str) -> RawOutcome {
    RawOutcome::success(format!("{}\n", stdout))
}

pub fn err(stderr: &str) -> RawOutcome {
    RawOutcome::failure(1, format!("{}\n", stderr))
}

pub fn test_config() -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.cli = CliConfig {
        binary_path: PathBuf::from("coral-cli"),
        data_dir: Some(PathBuf::from(TEST_DATADIR)),
    };
    config.timeouts = TimeoutConfig::default();
    config
}

pub fn proxy(invoker: Arc<ScriptedInvoker>) -> CommandProxy {
    let config = test_config();
    CommandProxy::new(config.cli, config.timeouts, invoker)
}

/// A gateway serving on an ephemeral port.
pub struct TestGateway {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    shutdown: Shutdown,
}

impl TestGateway {
    pub async fn start(invoker: Arc<ScriptedInvoker>) -> Self {
        let server = HttpServer::with_proxy(test_config(), proxy(invoker));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = Shutdown::new();
        let rx = shutdown.subscribe();
        tokio::spawn(async move {
            let _ = server.run(listener, rx).await;
        });

        let client = reqwest::Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        Self {
            addr,
            client,
            shutdown,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> (u16, serde_json::Value) {
        let res = self.client.get(self.url(path)).send().await.expect("gateway unreachable");
        let status = res.status().as_u16();
        (status, res.json().await.expect("response is not JSON"))
    }

    pub async fn post(&self, path: &str, body: serde_json::Value) -> (u16, serde_json::Value) {
        let res = self
            .client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .expect("gateway unreachable");
        let status = res.status().as_u16();
        (status, res.json().await.expect("response is not JSON"))
    }
}

impl Drop for TestGateway {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}
