use alloy::primitives::{Log, TxHash, U256};
use alloy_sol_types::SolEvent;
use tracing::{debug, warn};

use crate::{
    abi::augur::Augur::{OrderCreated, OrderFilled},
    client::ReceiptSource,
    error::{Error, InputError, Result},
};

/// Unfilled part of a trade after one of its transactions was mined.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AmountRemaining {
    /// Attoshares still to trade.
    pub remaining: U256,
    /// Set when the logs reported more fills than the trade had left.
    pub overfilled: bool,
}

/// Attoshares of the trade consumed by one fill: the shares the maker put up
/// plus the tokens they escrowed, expressed in shares at `on_chain_fill_price`.
///
/// A fractional share worth of tokens counts as a whole attoshare, so the
/// remaining amount is the whole attoshares still to trade.
pub fn calculate_total_fill(
    num_creator_shares: U256,
    num_creator_tokens: U256,
    on_chain_fill_price: U256,
) -> std::result::Result<U256, InputError> {
    if on_chain_fill_price.is_zero() {
        return Err(InputError::ZeroFillPrice);
    }
    Ok(num_creator_shares.saturating_add(num_creator_tokens.div_ceil(on_chain_fill_price)))
}

/// Looks up the receipt of `tx_hash` and subtracts the fills it reports from
/// `starting_on_chain_amount`.
pub async fn get_trade_amount_remaining<R: ReceiptSource>(
    receipts: &R,
    tx_hash: TxHash,
    starting_on_chain_amount: U256,
    on_chain_fill_price: U256,
) -> Result<AmountRemaining> {
    let logs = receipts
        .transaction_receipt(tx_hash)
        .await?
        .ok_or(Error::ReceiptNotFound(tx_hash))?;
    if logs.is_empty() {
        return Err(Error::NoLogs(tx_hash));
    }
    trade_amount_remaining_from_logs(&logs, starting_on_chain_amount, on_chain_fill_price)
}

/// Replays trade logs in order.
///
/// Each `OrderFilled` reduces the remaining amount, clamped at zero. An
/// `OrderCreated` means the rest of the trade now rests on the book, so
/// nothing is left to trade. Other logs are ignored.
pub fn trade_amount_remaining_from_logs(
    logs: &[Log],
    starting_on_chain_amount: U256,
    on_chain_fill_price: U256,
) -> Result<AmountRemaining> {
    let mut remaining = starting_on_chain_amount;
    let mut overfilled = false;
    for log in logs {
        match log.topics().first() {
            Some(topic) if *topic == OrderFilled::SIGNATURE_HASH => {
                let filled = OrderFilled::decode_log_data(&log.data)?;
                let fill = calculate_total_fill(
                    filled.numCreatorShares,
                    filled.numCreatorTokens,
                    on_chain_fill_price,
                )?;
                if fill > remaining {
                    warn!(
                        %remaining,
                        %fill,
                        order_id = %filled.orderId,
                        "fill exceeds remaining amount"
                    );
                    overfilled = true;
                }
                remaining = remaining.saturating_sub(fill);
                debug!(%fill, %remaining, "order filled");
            }
            Some(topic) if *topic == OrderCreated::SIGNATURE_HASH => {
                debug!("order created for the rest of the trade");
                remaining = U256::ZERO;
            }
            _ => {}
        }
    }
    Ok(AmountRemaining {
        remaining,
        overfilled,
    })
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{B256, LogData, TxHash, U256};
    use tokio_test::{assert_err, assert_ok};

    use super::*;
    use crate::testing::{MockChain, order_created_log, order_filled_log};

    #[test]
    fn test_calculate_total_fill() {
        assert_eq!(
            calculate_total_fill(U256::from(100), U256::from(50_000), U256::from(5000)),
            Ok(U256::from(110))
        );
        // tokens worth part of an attoshare consume it
        assert_eq!(
            calculate_total_fill(U256::ZERO, U256::from(4999), U256::from(5000)),
            Ok(U256::from(1))
        );
        assert_eq!(
            calculate_total_fill(U256::from(2), U256::from(10_001), U256::from(5000)),
            Ok(U256::from(5))
        );
        assert_eq!(
            calculate_total_fill(U256::from(1), U256::from(1), U256::ZERO),
            Err(InputError::ZeroFillPrice)
        );
    }

    #[test]
    fn test_fills_are_subtracted_in_order() {
        let logs = vec![
            order_filled_log(U256::from(300), U256::ZERO),
            Log::new_unchecked(Default::default(), vec![B256::repeat_byte(7)], Default::default()),
            order_filled_log(U256::ZERO, U256::from(1_000_000)),
        ];
        let result =
            trade_amount_remaining_from_logs(&logs, U256::from(1000), U256::from(5000)).unwrap();
        assert_eq!(
            result,
            AmountRemaining {
                remaining: U256::from(500),
                overfilled: false
            }
        );
    }

    #[test]
    fn test_partial_attoshare_fill_counts_as_progress() {
        // 3 attoshares at 3 ticks escrow 9 tokens, one fill reports 8 of them
        let logs = vec![order_filled_log(U256::ZERO, U256::from(8))];
        let result =
            trade_amount_remaining_from_logs(&logs, U256::from(3), U256::from(3)).unwrap();
        assert_eq!(result.remaining, U256::ZERO);
        assert!(!result.overfilled);
    }

    #[test]
    fn test_order_created_leaves_nothing_to_trade() {
        let logs = vec![
            order_filled_log(U256::from(300), U256::ZERO),
            order_created_log(U256::from(700)),
        ];
        let result =
            trade_amount_remaining_from_logs(&logs, U256::from(1000), U256::from(5000)).unwrap();
        assert_eq!(result.remaining, U256::ZERO);
        assert!(!result.overfilled);
    }

    #[test]
    fn test_overfill_is_clamped_and_flagged() {
        let logs = vec![
            order_filled_log(U256::from(800), U256::ZERO),
            order_filled_log(U256::from(800), U256::ZERO),
        ];
        let result =
            trade_amount_remaining_from_logs(&logs, U256::from(1000), U256::from(5000)).unwrap();
        assert_eq!(result.remaining, U256::ZERO);
        assert!(result.overfilled);
    }

    #[test]
    fn test_malformed_fill_log_is_rejected() {
        let topics = vec![OrderFilled::SIGNATURE_HASH, B256::ZERO, B256::ZERO];
        let log = Log {
            address: Default::default(),
            data: LogData::new_unchecked(topics, Default::default()),
        };
        assert!(matches!(
            trade_amount_remaining_from_logs(&[log], U256::from(1), U256::from(1)),
            Err(Error::Fatal(_))
        ));
    }

    #[tokio::test]
    async fn test_receipt_lookup() {
        let chain = MockChain::default();
        let missing = TxHash::repeat_byte(1);
        assert!(matches!(
            get_trade_amount_remaining(&chain, missing, U256::from(10), U256::from(1)).await,
            Err(Error::ReceiptNotFound(hash)) if hash == missing
        ));

        let empty = TxHash::repeat_byte(2);
        chain.insert_receipt(empty, Vec::new());
        assert!(matches!(
            get_trade_amount_remaining(&chain, empty, U256::from(10), U256::from(1)).await,
            Err(Error::NoLogs(hash)) if hash == empty
        ));

        let filled = TxHash::repeat_byte(3);
        chain.insert_receipt(filled, vec![order_filled_log(U256::from(4), U256::ZERO)]);
        let result = assert_ok!(
            get_trade_amount_remaining(&chain, filled, U256::from(10), U256::from(1)).await
        );
        assert_eq!(result.remaining, U256::from(6));

        assert_err!(
            get_trade_amount_remaining(&chain, filled, U256::from(10), U256::ZERO).await
        );
    }
}
