//! Trading tool for Augur markets.
//!
//! This binary trades until an amount is filled, places resting orders and
//! drives the reporting lifecycle of markets on test deployments.

mod config;
mod error;
mod runner;

use alloy::{network::EthereumWallet, signers::local::PrivateKeySigner};
use clap::Parser;
use std::{process::exit, time::Duration};
use tracing::error;
use url::Url;

use config::{CliConfig, EnvConfig};
use runner::Runner;

#[tokio::main]
async fn main() {
    // Load .env file
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Warning: Failed to load .env file: {}", e);
    }

    // Parse environment configuration
    let env_config = match EnvConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to parse environment configuration: {}", e);
            exit(1);
        }
    };

    // Parse CLI arguments
    let cli_config = CliConfig::parse();

    // Set up logging
    if std::env::var("RUST_LOG").is_err() {
        unsafe {
            std::env::set_var("RUST_LOG", "info");
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let network = match env_config.network() {
        Ok(network) => network,
        Err(e) => {
            eprintln!("Invalid contract address: {}", e);
            exit(1);
        }
    };

    // Parse private key
    let private_key: PrivateKeySigner = match env_config.private_key.parse() {
        Ok(key) => key,
        Err(e) => {
            eprintln!("Invalid private key: {}", e);
            exit(1);
        }
    };

    let wallet = EthereumWallet::new(private_key);

    // Parse RPC URL
    let node_url = match Url::parse(&env_config.node_rpc_url) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("Invalid RPC URL: {}", e);
            exit(1);
        }
    };

    // Default timeout is 30 seconds
    let timeout = Duration::from_secs(env_config.timeout_seconds.unwrap_or(30));

    let runner = Runner::new(node_url, wallet, network, timeout);
    if let Err(e) = runner.run(cli_config.command).await {
        error!(%e, "Command failed");
        exit(1);
    }
}
