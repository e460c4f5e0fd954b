//! Configuration for the trade tool.
//!
//! Configuration comes from two sources:
//! - Environment variables (via .env file or shell): connection details, keys, contracts
//! - CLI arguments: the operation to run and its parameters

use alloy::primitives::{Address, B256, U256};
use augur_sdk::{
    Network,
    num::{self, Precision},
    types::{OrderType, Outcome},
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use fastnum::D256;

/// Environment configuration (connection details, credentials).
#[derive(Debug, serde::Deserialize)]
pub struct EnvConfig {
    /// Chain ID (e.g., 1337 for a local test deployment)
    pub chain_id: u64,

    /// RPC URL for the node
    pub node_rpc_url: String,

    /// Private key for signing transactions
    pub private_key: String,

    /// Augur contract address (event emitter)
    pub augur_address: String,

    /// Trade contract address
    pub trade_address: String,

    /// CreateOrder contract address
    pub create_order_address: String,

    /// Time controller address (test deployments)
    pub time_address: String,

    /// Optional timeout waiting for transactions (default: 30s)
    pub timeout_seconds: Option<u64>,
}

impl EnvConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// Parse the contract addresses into a network description.
    pub fn network(&self) -> Result<Network, alloy::primitives::hex::FromHexError> {
        Ok(Network::custom(
            self.chain_id,
            self.augur_address.parse()?,
            self.trade_address.parse()?,
            self.create_order_address.parse()?,
            self.time_address.parse()?,
        ))
    }
}

/// CLI arguments.
#[derive(Debug, Parser)]
#[command(name = "trade")]
#[command(about = "Trading and reporting tool for Augur markets")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Trade until the full amount is filled or rests on the book
    Trade(OrderArgs),

    /// Place a resting order
    CreateOrder(OrderArgs),

    /// Move time past the designated reporting window and report an outcome
    InitialReport(ReportArgs),

    /// Stake REP on an outcome to dispute the tentative one
    Dispute {
        #[command(flatten)]
        report: ReportArgs,

        /// Amount of attoREP to stake
        #[arg(long)]
        amount: String,
    },

    /// Move time past the fee window and finalize a market
    Finalize {
        /// Market address
        #[arg(long)]
        market: String,
    },

    /// Move contract time forward
    PushTime {
        /// Number of seconds
        #[arg(long)]
        seconds: u64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Direction {
    Buy,
    Sell,
}

impl From<Direction> for OrderType {
    fn from(value: Direction) -> Self {
        match value {
            Direction::Buy => OrderType::Buy,
            Direction::Sell => OrderType::Sell,
        }
    }
}

/// Order parameters shared by `trade` and `create-order`.
#[derive(Debug, Args)]
pub struct OrderArgs {
    /// Market address
    #[arg(long)]
    pub market: String,

    /// Outcome index
    #[arg(long)]
    pub outcome: Outcome,

    #[arg(long, value_enum)]
    pub direction: Direction,

    /// Display price (e.g., 0.5)
    #[arg(long)]
    pub price: String,

    /// Display amount in shares (e.g., 10)
    #[arg(long)]
    pub amount: String,

    /// Lowest display price of the market
    #[arg(long, default_value = "0")]
    pub min_price: String,

    /// Highest display price of the market
    #[arg(long, default_value = "1")]
    pub max_price: String,

    /// Trade group ID (32 bytes hex)
    #[arg(long)]
    pub trade_group_id: Option<String>,

    /// Only fill existing orders, never leave a resting order
    #[arg(long, default_value_t = false)]
    pub do_not_create_orders: bool,

    /// Amounts at or below this are treated as zero
    #[arg(long, default_value = "0.00000001")]
    pub precision: String,
}

/// Report parameters.
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Market address
    #[arg(long)]
    pub market: String,

    /// Reported outcome index
    #[arg(long, conflicts_with = "invalid")]
    pub outcome: Option<Outcome>,

    /// Report the market as invalid
    #[arg(long, default_value_t = false)]
    pub invalid: bool,

    /// Lowest display price of the market
    #[arg(long, default_value = "0")]
    pub min_price: String,

    /// Highest display price of the market
    #[arg(long, default_value = "1")]
    pub max_price: String,
}

/// Validated order parameters. Tick parameters are read from the market
/// contract later.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderConfig {
    pub market: Address,
    pub outcome: Outcome,
    pub order_type: OrderType,
    pub price: D256,
    pub amount: D256,
    pub min_price: D256,
    pub max_price: D256,
    pub trade_group_id: B256,
    pub do_not_create_orders: bool,
    pub precision: Precision,
}

/// Validated report parameters. `outcome` is `None` for an invalid report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub market: Address,
    pub outcome: Option<Outcome>,
    pub min_price: D256,
    pub max_price: D256,
}

impl OrderArgs {
    pub fn to_order_config(&self) -> Result<OrderConfig, ConfigError> {
        let price = decimal("price", &self.price)?;
        let amount = decimal("amount", &self.amount)?;
        if amount <= D256::ZERO {
            return Err(ConfigError::NonPositiveAmount);
        }
        let trade_group_id = match &self.trade_group_id {
            Some(id) => id
                .parse()
                .map_err(|_| ConfigError::InvalidTradeGroupId(id.clone()))?,
            None => B256::ZERO,
        };
        Ok(OrderConfig {
            market: address(&self.market)?,
            outcome: self.outcome,
            order_type: self.direction.into(),
            price,
            amount,
            min_price: decimal("min_price", &self.min_price)?,
            max_price: decimal("max_price", &self.max_price)?,
            trade_group_id,
            do_not_create_orders: self.do_not_create_orders,
            precision: Precision {
                zero: decimal("precision", &self.precision)?,
            },
        })
    }
}

impl ReportArgs {
    pub fn to_report_config(&self) -> Result<ReportConfig, ConfigError> {
        let outcome = match (self.outcome, self.invalid) {
            (Some(outcome), false) => Some(outcome),
            (None, true) => None,
            _ => return Err(ConfigError::MissingOutcome),
        };
        Ok(ReportConfig {
            market: address(&self.market)?,
            outcome,
            min_price: decimal("min_price", &self.min_price)?,
            max_price: decimal("max_price", &self.max_price)?,
        })
    }
}

pub fn parse_attos(name: &str, value: &str) -> Result<U256, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidDecimal(name.to_string()))
}

pub fn address(value: &str) -> Result<Address, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidAddress(value.to_string()))
}

fn decimal(name: &str, value: &str) -> Result<D256, ConfigError> {
    num::parse_decimal(value).map_err(|_| ConfigError::InvalidDecimal(name.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid decimal value for {0}")]
    InvalidDecimal(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid trade group ID: {0}")]
    InvalidTradeGroupId(String),

    #[error("amount must be positive")]
    NonPositiveAmount,

    #[error("either --outcome or --invalid is required")]
    MissingOutcome,
}
