//! Time control of test deployments, where the contracts read the current
//! time from a settable `Time` contract instead of the block timestamp.

use alloy::{
    primitives::{TxHash, U256},
    providers::Provider,
};
use tracing::info;

use crate::{abi::time::Time, client::ContractClient, error::Result};

/// Current contract time, in seconds since the Unix epoch.
pub async fn current_timestamp<P: Provider>(client: &ContractClient<P>) -> Result<u64> {
    let instance = Time::new(client.network().time(), client.provider());
    let timestamp = instance.getTimestamp().call().await?;
    Ok(timestamp.saturating_to())
}

pub async fn set_timestamp<P: Provider>(
    client: &ContractClient<P>,
    timestamp: u64,
) -> Result<TxHash> {
    info!(timestamp, "setting contract time");
    let instance = Time::new(client.network().time(), client.provider());
    let pending = instance.setTimestamp(U256::from(timestamp)).send().await?;
    client.confirm(pending).await
}

/// Moves contract time `seconds` forward.
pub async fn push_time<P: Provider>(client: &ContractClient<P>, seconds: u64) -> Result<TxHash> {
    let now = current_timestamp(client).await?;
    set_timestamp(client, now.saturating_add(seconds)).await
}

/// Moves contract time to `timestamp` unless it is already past it.
///
/// Returns the hash of the time transaction, if one was needed.
pub(crate) async fn advance_to<P: Provider>(
    client: &ContractClient<P>,
    now: u64,
    timestamp: u64,
) -> Result<Option<TxHash>> {
    if now >= timestamp {
        return Ok(None);
    }
    set_timestamp(client, timestamp).await.map(Some)
}

#[cfg(test)]
mod tests {
    use alloy::transports::mock::Asserter;

    use super::*;
    use crate::testing::{mocked_client, push_call_result, push_revert};

    #[tokio::test]
    async fn test_current_timestamp() {
        let asserter = Asserter::new();
        push_call_result(&asserter, U256::from(1_700_000_000u64));
        let client = mocked_client(asserter);
        assert_eq!(current_timestamp(&client).await.unwrap(), 1_700_000_000);
    }

    #[tokio::test]
    async fn test_time_only_moves_forward() {
        // nothing queued: any request would fail
        let client = mocked_client(Asserter::new());
        assert_eq!(advance_to(&client, 2_000, 1_000).await.unwrap(), None);
        assert_eq!(advance_to(&client, 2_000, 2_000).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_push_time_fails_when_time_is_unreadable() {
        let asserter = Asserter::new();
        asserter.push_failure_msg("time contract unavailable");
        let client = mocked_client(asserter.clone());
        assert!(matches!(
            push_time(&client, 60).await,
            Err(crate::error::Error::Transport(_))
        ));
        assert!(asserter.read_q().is_empty());
    }

    #[tokio::test]
    async fn test_push_time_sets_a_later_timestamp() {
        let asserter = Asserter::new();
        push_call_result(&asserter, U256::from(1_000));
        push_revert(&asserter);
        let client = mocked_client(asserter.clone());
        assert!(matches!(
            push_time(&client, 60).await,
            Err(crate::error::Error::Reverted { tx_hash: None, .. })
        ));
        assert!(asserter.read_q().is_empty());
    }
}
