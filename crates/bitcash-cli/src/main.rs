//! # bitcash
//!
//! Command-line interface for the BitCash oracle and token contracts.
//!
//! ## Usage
//!
//! ```bash
//! # Oracle commands
//! bitcash oracle register --owner alice
//! bitcash oracle write --owner alice --pair btcusd --value 64250.12
//! bitcash oracle pairs
//! bitcash oracle table stats --key alice
//!
//! # Token commands
//! bitcash token create --issuer alice --symbol BTC --precision 8 --max-supply 21000000
//! bitcash token list
//!
//! # Configuration
//! bitcash config --set-rpc https://api.example.com
//! ```
//!
//! Values come from flags, then the environment (`.env` is loaded first),
//! then `~/.bitcash/config.toml`.

use bitcash_primitives::{Checksum256, Name};
use bitcash_sdk::Environment;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

use commands::Context;
pub use config::Config;
pub use error::CliError;
pub use output::Output;

/// BitCash CLI
#[derive(Parser, Debug)]
#[command(name = "bitcash")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// RPC endpoint URL
    #[arg(long, global = true, env = "RPC_ENDPOINT")]
    rpc: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// CLI commands
#[derive(Debug, Subcommand)]
enum Commands {
    /// Oracle operations
    #[command(subcommand)]
    Oracle(commands::oracle::OracleCommand),
    /// Token operations
    #[command(subcommand)]
    Token(commands::token::TokenCommand),
    /// Show or edit configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
        /// Set RPC URL
        #[arg(long)]
        set_rpc: Option<String>,
        /// Set chain ID
        #[arg(long)]
        set_chain_id: Option<Checksum256>,
        /// Set signing permission
        #[arg(long)]
        set_permission: Option<Name>,
    },
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let json = cli.json;

    if let Err(e) = run(cli).await {
        if json {
            println!(
                "{}",
                serde_json::json!({
                    "error": e.to_string(),
                    "success": false
                })
            );
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

/// Logs go to stderr; `RUST_LOG` wins over `DEBUG=true`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let debug = std::env::var("DEBUG").map(|v| v == "true").unwrap_or(false);
        EnvFilter::new(if debug { "debug" } else { "warn" })
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = Config::load()?;

    match cli.command {
        Commands::Oracle(cmd) => cmd.execute(&context(&config, cli.rpc, cli.json)?).await,
        Commands::Token(cmd) => cmd.execute(&context(&config, cli.rpc, cli.json)?).await,
        Commands::Config {
            show,
            set_rpc,
            set_chain_id,
            set_permission,
        } => handle_config(&mut config, show, set_rpc, set_chain_id, set_permission, cli.json),
    }
}

/// Environment variables first, the config file for whatever they leave unset
fn context(config: &Config, rpc: Option<String>, json: bool) -> Result<Context, CliError> {
    let mut env = Environment::from_lookup(|key| {
        std::env::var(key).ok().filter(|v| !v.is_empty()).or_else(|| config.lookup(key))
    })?;
    if let Some(rpc) = rpc {
        env = env.with_rpc_endpoint(rpc);
    }
    tracing::debug!(rpc = %env.rpc_endpoint, chain_id = %env.chain_id, permission = %env.permission, "environment");
    Ok(Context::new(env, json))
}

fn handle_config(
    config: &mut Config,
    show: bool,
    set_rpc: Option<String>,
    set_chain_id: Option<Checksum256>,
    set_permission: Option<Name>,
    json: bool,
) -> Result<(), CliError> {
    let mut modified = false;

    if let Some(rpc) = set_rpc {
        config.rpc_url = Some(rpc);
        modified = true;
    }

    if let Some(chain_id) = set_chain_id {
        config.chain_id = Some(chain_id.to_string());
        modified = true;
    }

    if let Some(permission) = set_permission {
        config.permission = Some(permission.to_string());
        modified = true;
    }

    if modified {
        let path = config.save()?;
        Output::new(json)
            .field("status", "saved")
            .field("path", &path.display().to_string())
            .message("Configuration saved")
            .print();
    } else if show {
        Output::new(json)
            .field("rpc_url", config.effective_rpc_url())
            .field("chain_id", config.effective_chain_id())
            .field("permission", config.effective_permission())
            .message(&format!(
                "RPC URL: {}\nChain ID: {}\nPermission: {}",
                config.effective_rpc_url(),
                config.effective_chain_id(),
                config.effective_permission()
            ))
            .print();
    } else {
        Output::new(json)
            .message("Use --show to display config, or --set-rpc/--set-chain-id/--set-permission to modify")
            .print();
    }

    Ok(())
}
