use clap::{Parser, Subcommand};
use reqwest::Url;
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Command-line client for the Coral gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:5999")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Blockchain, network and mining summary
    Info,
    /// Balance of a wallet
    Balance { wallet: String },
    /// Block by height or hash
    Block { id: String },
    /// Most recent blocks
    Recent {
        #[arg(short, long, default_value_t = 10)]
        count: u64,
    },
    /// Mine blocks, to a fresh wallet address unless one is given
    Generate {
        #[arg(short, long, default_value_t = 1)]
        blocks: u64,
        #[arg(short, long)]
        address: Option<String>,
    },
    /// Run an arbitrary node command, e.g. `rpc getblockhash 10`
    Rpc {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.as_str();

    let res = match cli.command {
        Commands::Info => client.get(endpoint(base, &["api", "info"])?).send().await?,
        Commands::Balance { wallet } => {
            client
                .get(endpoint(base, &["api", "wallet", wallet.as_str(), "balance"])?)
                .send()
                .await?
        }
        Commands::Block { id } => {
            client
                .get(endpoint(base, &["api", "block", id.as_str()])?)
                .send()
                .await?
        }
        Commands::Recent { count } => {
            client
                .get(endpoint(base, &["api", "recentblocks"])?)
                .query(&[("count", count)])
                .send()
                .await?
        }
        Commands::Generate { blocks, address } => {
            let mut body = json!({ "blocks": blocks });
            if let Some(address) = address {
                body["address"] = Value::String(address);
            }
            client
                .post(endpoint(base, &["api", "mining", "generate"])?)
                .json(&body)
                .send()
                .await?
        }
        Commands::Rpc { command } => {
            client
                .post(endpoint(base, &["api", "rpc"])?)
                .json(&json!({ "command": command.join(" ") }))
                .send()
                .await?
        }
    };

    print_response(res).await
}

/// Gateway URL with each segment percent-encoded, so a wallet named
/// `a/b` stays one path segment.
fn endpoint(base: &str, segments: &[&str]) -> Result<Url, Box<dyn std::error::Error>> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| format!("gateway URL '{}' cannot carry a path", base))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let json: Value = res.json().await?;

    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if let Some(error) = json.get("error").and_then(Value::as_str) {
            eprintln!("{}", error);
        } else {
            eprintln!("{}", serde_json::to_string_pretty(&json)?);
        }
        std::process::exit(1);
    }

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
