use std::fmt::Display;

use alloy::{
    contract,
    primitives::{Address, Bytes, TxHash, U256},
    providers::PendingTransactionError,
    sol_types, transports,
};
use fastnum::D256;

/// Call/transaction revert reason, as much of it as the node reported.
#[derive(Debug)]
pub enum RevertReason {
    Message(String),
    Data(Bytes),
    Unknown,
}

/// Malformed caller-supplied parameters, detected before any network call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("number of ticks must be a positive integer, got {0}")]
    InvalidNumTicks(D256),

    #[error("empty price range: min {min}, max {max}")]
    EmptyPriceRange { min: D256, max: D256 },

    #[error("price {price} is outside of market range [{min}, {max}]")]
    PriceOutOfRange { price: D256, min: D256, max: D256 },

    #[error("amount must not be negative, got {0}")]
    NegativeAmount(D256),

    #[error("number of shares is too small: {0}")]
    SharesTooSmall(D256),

    #[error("market must have at least two outcomes, got {0}")]
    InvalidNumOutcomes(u8),

    #[error("invalid outcome {outcome} for a market with {num_outcomes} outcomes")]
    InvalidOutcome { outcome: u8, num_outcomes: usize },

    #[error("expected balances for {expected} outcomes, got {actual}")]
    ShareBalancesMismatch { expected: usize, actual: usize },

    #[error("fee rate must not be negative, got {0}")]
    NegativeFeeRate(D256),

    #[error("invalid order type code: {0}")]
    InvalidOrderType(u8),

    #[error("invalid decimal value: {0}")]
    InvalidDecimal(String),

    #[error("value does not fit an on-chain unsigned integer: {0}")]
    NotOnChainInteger(D256),

    #[error("fill price must be non-zero")]
    ZeroFillPrice,

    #[error("{num_ticks} ticks cannot be split evenly across {num_outcomes} outcomes")]
    UnevenInvalidPayout { num_ticks: U256, num_outcomes: u8 },
}

/// Error returned by the SDK operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("input error: {0}")]
    Input(#[from] InputError),

    #[error("fatal error: {0}")]
    Fatal(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("unexpected empty RPC response")]
    NullResp,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("transaction timed out")]
    Timeout,

    #[error("transaction receipt not found: {0}")]
    ReceiptNotFound(TxHash),

    #[error("transaction receipt has no logs: {0}")]
    NoLogs(TxHash),

    #[error("transaction reverted (tx: {tx_hash:?}): {reason:?}")]
    Reverted {
        tx_hash: Option<TxHash>,
        reason: Box<RevertReason>,
    },

    #[error("market {0} has not been reported on yet")]
    MarketNotReported(Address),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn reverted(tx_hash: TxHash) -> Self {
        Self::Reverted {
            tx_hash: Some(tx_hash),
            reason: Box::new(RevertReason::Unknown),
        }
    }
}

impl From<contract::Error> for Error {
    fn from(value: contract::Error) -> Self {
        match value {
            contract::Error::UnknownFunction(_) => Self::Fatal(value.to_string()),
            contract::Error::UnknownSelector(_) => Self::Fatal(value.to_string()),
            contract::Error::NotADeploymentTransaction => Self::Fatal(value.to_string()),
            contract::Error::ContractNotDeployed => Self::Fatal(value.to_string()),
            contract::Error::ZeroData(_, _) => Self::Fatal(value.to_string()),
            contract::Error::AbiError(_) => Self::Fatal(value.to_string()),
            contract::Error::TransportError(rpc_err) => Self::from(rpc_err),
            contract::Error::PendingTransactionError(err) => err.into(),
        }
    }
}

impl From<PendingTransactionError> for Error {
    fn from(value: PendingTransactionError) -> Self {
        match value {
            PendingTransactionError::FailedToRegister => Self::Fatal(value.to_string()),
            PendingTransactionError::TransportError(rpc_err) => Self::from(rpc_err),
            PendingTransactionError::Recv(_) => Self::Transport(value.to_string()),
            PendingTransactionError::TxWatcher(err) => match err {
                alloy::providers::WatchTxError::Timeout => Self::Timeout,
            },
        }
    }
}

impl<E: Display> From<transports::RpcError<E>> for Error {
    fn from(value: transports::RpcError<E>) -> Self {
        match value {
            transports::RpcError::ErrorResp(ref resp) => {
                let msg = resp.message.to_ascii_lowercase();
                if (resp.code == -32600 || resp.code == -32601 || resp.code == -32602)
                    && (msg.contains("invalid") || msg.contains("not found"))
                {
                    Self::InvalidRequest(msg)
                } else if resp.code == 3 && msg.contains("reverted") {
                    let reason = match resp.as_revert_data() {
                        Some(data) => RevertReason::Data(data),
                        None => RevertReason::Message(resp.message.to_string()),
                    };
                    Self::Reverted {
                        tx_hash: None,
                        reason: Box::new(reason),
                    }
                } else {
                    Self::Transport(value.to_string())
                }
            }
            transports::RpcError::NullResp => Self::NullResp,
            _ => Self::Transport(value.to_string()),
        }
    }
}

impl From<sol_types::Error> for Error {
    fn from(value: sol_types::Error) -> Self {
        Self::Fatal(value.to_string())
    }
}
