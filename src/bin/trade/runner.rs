//! Execution of the trade tool commands.

use alloy::{
    network::EthereumWallet,
    primitives::Address,
    providers::{DynProvider, ProviderBuilder},
    rpc::client::RpcClient,
};
use augur_sdk::{
    Network,
    abi::market::Market as MarketContract,
    client::ContractClient,
    reporting, time,
    trading::{self, TradeIntent},
    types::{Market, OrderId},
};
use fastnum::D256;
use std::time::Duration;
use tracing::info;
use url::Url;

use crate::{
    config::{self, Command, OrderConfig, ReportConfig},
    error::{Error, Result},
};

/// Command runner holding the connection to the node.
#[derive(Debug)]
pub struct Runner {
    client: ContractClient<DynProvider>,
}

impl Runner {
    pub fn new(node_url: Url, wallet: EthereumWallet, network: Network, timeout: Duration) -> Self {
        let wallet_address = wallet.default_signer().address();
        info!(%wallet_address, chain_id = network.chain_id(), "Initializing trade tool");

        let rpc_client = RpcClient::new_http(node_url);
        let provider = DynProvider::new(
            ProviderBuilder::new()
                .wallet(wallet)
                .connect_client(rpc_client),
        );
        Self {
            client: ContractClient::new(provider, network).with_timeout(timeout),
        }
    }

    pub async fn run(&self, command: Command) -> Result<()> {
        match command {
            Command::Trade(args) => self.trade(args.to_order_config()?).await,
            Command::CreateOrder(args) => self.create_order(args.to_order_config()?).await,
            Command::InitialReport(args) => {
                let report = args.to_report_config()?;
                let market = self
                    .market(report.market, report.min_price, report.max_price)
                    .await?;
                let tx_hash =
                    reporting::initial_report(&self.client, &market, report.outcome).await?;
                info!(%tx_hash, "Initial report done");
                Ok(())
            }
            Command::Dispute { report, amount } => {
                let ReportConfig {
                    market,
                    outcome,
                    min_price,
                    max_price,
                } = report.to_report_config()?;
                let amount = config::parse_attos("amount", &amount)?;
                let market = self.market(market, min_price, max_price).await?;
                let tx_hash =
                    reporting::dispute_contribute(&self.client, &market, outcome, amount).await?;
                info!(%tx_hash, "Dispute contribution done");
                Ok(())
            }
            Command::Finalize { market } => {
                let tx_hash =
                    reporting::finalize_market(&self.client, config::address(&market)?).await?;
                info!(%tx_hash, "Market finalized");
                Ok(())
            }
            Command::PushTime { seconds } => {
                time::push_time(&self.client, seconds).await?;
                let now = time::current_timestamp(&self.client).await?;
                info!(timestamp = now, "Time moved");
                Ok(())
            }
        }
    }

    async fn trade(&self, config: OrderConfig) -> Result<()> {
        let market = self
            .market(config.market, config.min_price, config.max_price)
            .await?;
        let intent = TradeIntent {
            direction: config.order_type,
            market,
            outcome: config.outcome,
            display_price: config.price,
            display_amount: config.amount,
            trade_group_id: config.trade_group_id,
            do_not_create_orders: config.do_not_create_orders,
        };
        let outcome = trading::trade_until_amount_is_zero(
            &self.client,
            &self.client,
            &intent,
            &config.precision,
        )
        .await?;
        info!(
            transactions = outcome.transactions.len(),
            unfilled = %outcome.unfilled_on_chain_amount,
            stalled = outcome.stalled,
            "Trade finished"
        );
        Ok(())
    }

    async fn create_order(&self, config: OrderConfig) -> Result<()> {
        let market = self
            .market(config.market, config.min_price, config.max_price)
            .await?;
        let tx_hash = trading::create_order(
            &self.client,
            &market,
            config.order_type,
            config.outcome,
            config.price,
            config.amount,
            OrderId::ZERO,
            OrderId::ZERO,
            config.trade_group_id,
        )
        .await?;
        info!(%tx_hash, "Order created");
        Ok(())
    }

    /// Reads the market tick parameters from its contract.
    async fn market(&self, id: Address, min_price: D256, max_price: D256) -> Result<Market> {
        let instance = MarketContract::new(id, self.client.provider());
        let (num_ticks, num_outcomes) = futures::try_join!(
            async { instance.getNumTicks().call().await },
            async { instance.getNumberOfOutcomes().call().await },
        )?;
        let num_outcomes = u8::try_from(num_outcomes)
            .map_err(|_| Error::InvalidNumOutcomes(num_outcomes.to_string()))?;
        Ok(Market::new(id, num_outcomes, num_ticks, min_price, max_price)?)
    }
}
