use fastnum::D256;

/// Outcome of a simulated trade, accumulated over partial fills.
///
/// All fields except [`Self::share_balances`] are non-negative accumulators
/// that add up across partial results. Share balances are the cumulative
/// per-outcome holdings after applying the simulated trade.
#[derive(Clone, derive_more::Debug, PartialEq)]
pub struct SimulationResult {
    /// Shares filled immediately against resting orders.
    #[debug("{shares_filled}")]
    pub shares_filled: D256,
    /// Shares placed in a new resting order.
    #[debug("{new_order_shares}")]
    pub new_order_shares: D256,
    /// Creator and reporting fees charged on immediate fills.
    #[debug("{settlement_fees}")]
    pub settlement_fees: D256,
    /// Fees due if every traded share settled at the full payout.
    #[debug("{worst_case_fees}")]
    pub worst_case_fees: D256,
    #[debug("{gas_fees}")]
    pub gas_fees: D256,
    /// Shares of the traded outcome spent.
    #[debug("{shares_depleted}")]
    pub shares_depleted: D256,
    /// Shares of every other outcome spent.
    #[debug("{other_shares_depleted}")]
    pub other_shares_depleted: D256,
    /// Currency spent or escrowed.
    #[debug("{tokens_depleted}")]
    pub tokens_depleted: D256,
    pub share_balances: Vec<D256>,
}

impl SimulationResult {
    /// Empty result with the given starting balances.
    pub fn new(share_balances: Vec<D256>) -> Self {
        Self {
            shares_filled: D256::ZERO,
            new_order_shares: D256::ZERO,
            settlement_fees: D256::ZERO,
            worst_case_fees: D256::ZERO,
            gas_fees: D256::ZERO,
            shares_depleted: D256::ZERO,
            other_shares_depleted: D256::ZERO,
            tokens_depleted: D256::ZERO,
            share_balances,
        }
    }

    /// Combines with a result computed after this one.
    ///
    /// Accumulators are summed, balances are taken from `later`.
    pub fn merge(self, later: SimulationResult) -> Self {
        Self {
            shares_filled: self.shares_filled + later.shares_filled,
            new_order_shares: self.new_order_shares + later.new_order_shares,
            settlement_fees: self.settlement_fees + later.settlement_fees,
            worst_case_fees: self.worst_case_fees + later.worst_case_fees,
            gas_fees: self.gas_fees + later.gas_fees,
            shares_depleted: self.shares_depleted + later.shares_depleted,
            other_shares_depleted: self.other_shares_depleted + later.other_shares_depleted,
            tokens_depleted: self.tokens_depleted + later.tokens_depleted,
            share_balances: later.share_balances,
        }
    }
}

/// Sums partial results in order.
pub fn sum_simulated_results(
    results: impl IntoIterator<Item = SimulationResult>,
) -> Option<SimulationResult> {
    results.into_iter().reduce(SimulationResult::merge)
}
