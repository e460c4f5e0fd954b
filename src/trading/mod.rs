//! Trade preparation, simulation and execution.

pub mod convert;
mod cost;
mod filter;
pub mod simulation;
mod remaining;
mod trade;

pub use cost::{TradeCost, TradeCostParams, ask_cost, bid_cost, calculate_trade_cost};
pub use filter::filter_by_price_and_user_sort_by_price;
pub use remaining::{
    AmountRemaining, calculate_total_fill, get_trade_amount_remaining,
    trade_amount_remaining_from_logs,
};
pub use simulation::{
    FeeSchedule, GasEstimate, SimulationParams, SimulationResult, simulate_buy, simulate_sell,
    simulate_trade, sum_simulated_results,
};
pub use trade::{TradeIntent, TradeOutcome, TradeState, create_order, trade_until_amount_is_zero};
