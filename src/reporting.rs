//! Market reporting pipelines for test deployments.
//!
//! Each step waits for the previous transaction to be mined before sending
//! the next one.

use alloy::{
    primitives::{Address, TxHash, U256},
    providers::Provider,
};
use tracing::info;

use crate::{
    abi::market::{FeeWindow, Market as MarketContract},
    client::ContractClient,
    error::{Error, InputError, Result},
    time,
    types::{Market, Outcome},
};

/// Length of the designated reporter window following the market end.
pub const DESIGNATED_REPORTING_DURATION_SECS: u64 = 3 * 108_000;

/// Margin past the fee window end before finalizing.
pub const FINALIZATION_DELAY_SECS: u64 = 10_000;

/// Payout distribution of a report: all ticks to `outcome`, or an equal split
/// across outcomes for an invalid market (`None`).
///
/// Payouts always sum to the number of ticks, so an invalid report on a
/// market whose ticks do not divide evenly across outcomes is rejected.
pub fn payout_numerators(
    market: &Market,
    outcome: Option<Outcome>,
) -> std::result::Result<Vec<U256>, InputError> {
    let num_outcomes = market.num_outcomes() as usize;
    match outcome {
        Some(outcome) => {
            market.check_outcome(outcome)?;
            let mut payout = vec![U256::ZERO; num_outcomes];
            payout[outcome as usize] = market.num_ticks();
            Ok(payout)
        }
        None => {
            let (share, rest) = market.num_ticks().div_rem(U256::from(num_outcomes));
            if !rest.is_zero() {
                return Err(InputError::UnevenInvalidPayout {
                    num_ticks: market.num_ticks(),
                    num_outcomes: market.num_outcomes(),
                });
            }
            Ok(vec![share; num_outcomes])
        }
    }
}

/// Moves time past the designated reporting window and reports `outcome`
/// (`None` for invalid).
pub async fn initial_report<P: Provider>(
    client: &ContractClient<P>,
    market: &Market,
    outcome: Option<Outcome>,
) -> Result<TxHash> {
    let payout = payout_numerators(market, outcome)?;
    let instance = MarketContract::new(market.id(), client.provider());

    let (end_time, now) = futures::try_join!(
        async { Ok::<_, Error>(instance.getEndTime().call().await?) },
        time::current_timestamp(client),
    )?;
    let report_time = end_time
        .saturating_to::<u64>()
        .saturating_add(DESIGNATED_REPORTING_DURATION_SECS);
    time::advance_to(client, now, report_time).await?;

    info!(market = %market.id(), ?outcome, "initial report");
    let pending = instance
        .doInitialReport(payout, outcome.is_none())
        .send()
        .await?;
    client.confirm(pending).await
}

/// Stakes `amount` attoREP on a payout distribution disputing the current
/// tentative outcome.
pub async fn dispute_contribute<P: Provider>(
    client: &ContractClient<P>,
    market: &Market,
    outcome: Option<Outcome>,
    amount: U256,
) -> Result<TxHash> {
    let payout = payout_numerators(market, outcome)?;
    info!(market = %market.id(), ?outcome, %amount, "dispute contribution");
    let pending = MarketContract::new(market.id(), client.provider())
        .contribute(payout, outcome.is_none(), amount)
        .send()
        .await?;
    client.confirm(pending).await
}

/// Moves time past the end of the market fee window and finalizes the
/// market.
pub async fn finalize_market<P: Provider>(
    client: &ContractClient<P>,
    market: Address,
) -> Result<TxHash> {
    let instance = MarketContract::new(market, client.provider());
    let fee_window = instance.getFeeWindow().call().await?;
    if fee_window.is_zero() {
        return Err(Error::MarketNotReported(market));
    }

    let fee_window = FeeWindow::new(fee_window, client.provider());
    let (end_time, now) = futures::try_join!(
        async { Ok::<_, Error>(fee_window.getEndTime().call().await?) },
        time::current_timestamp(client),
    )?;
    let finalize_time = end_time
        .saturating_to::<u64>()
        .saturating_add(FINALIZATION_DELAY_SECS);
    time::advance_to(client, now, finalize_time).await?;

    info!(%market, "finalizing market");
    let pending = instance.finalize().send().await?;
    client.confirm(pending).await
}
