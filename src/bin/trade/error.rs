//! Error types for the trade tool.

use crate::config::ConfigError;

/// Main error type for the trade tool.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Alloy contract error: {0}")]
    AlloyContract(#[from] alloy::contract::Error),

    #[error("Augur SDK error: {0}")]
    Sdk(#[from] augur_sdk::error::Error),

    #[error("Invalid market parameters: {0}")]
    Market(#[from] augur_sdk::error::InputError),

    #[error("Market reports {0} outcomes, which is out of range")]
    InvalidNumOutcomes(String),
}

pub type Result<T> = std::result::Result<T, Error>;
