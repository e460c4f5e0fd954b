//! Contract bindings.

#[allow(clippy::too_many_arguments)]
pub mod augur {
    alloy::sol!(
        /// Events emitted by the central Augur contract.
        #[derive(Debug, PartialEq, Eq)]
        contract Augur {
            event OrderCreated(
                address indexed creator,
                address indexed universe,
                bytes32 indexed orderId,
                address shareToken,
                uint256 tradeGroupId,
                uint256 tokensEscrowed,
                uint256 sharesEscrowed
            );

            event OrderFilled(
                address indexed universe,
                address indexed shareToken,
                address filler,
                bytes32 orderId,
                uint256 numCreatorShares,
                uint256 numCreatorTokens,
                uint256 numFillerShares,
                uint256 numFillerTokens,
                uint256 marketCreatorFees,
                uint256 reporterFees,
                uint256 tradeGroupId
            );
        }
    );
}

#[allow(clippy::too_many_arguments)]
pub mod trade {
    alloy::sol!(
        #[derive(Debug)]
        #[sol(rpc)]
        interface Trade {
            function publicTrade(
                uint8 _direction,
                address _market,
                uint256 _outcome,
                uint256 _fxpAmount,
                uint256 _price,
                bytes32 _betterOrderId,
                bytes32 _worseOrderId,
                bytes32 _tradeGroupId
            ) external payable returns (bytes32);

            function publicFillBestOrder(
                uint8 _direction,
                address _market,
                uint256 _outcome,
                uint256 _fxpAmount,
                uint256 _price,
                bytes32 _tradeGroupId
            ) external payable returns (uint256);
        }
    );
}

#[allow(clippy::too_many_arguments)]
pub mod create_order {
    alloy::sol!(
        #[derive(Debug)]
        #[sol(rpc)]
        interface CreateOrder {
            function publicCreateOrder(
                uint8 _type,
                uint256 _attoshares,
                uint256 _displayPrice,
                address _market,
                uint256 _outcome,
                bytes32 _betterOrderId,
                bytes32 _worseOrderId,
                bytes32 _tradeGroupId
            ) external payable returns (bytes32);
        }
    );
}

pub mod market {
    alloy::sol!(
        #[derive(Debug)]
        #[sol(rpc)]
        interface Market {
            function getFeeWindow() external view returns (address);
            function getEndTime() external view returns (uint256);
            function getNumTicks() external view returns (uint256);
            function getNumberOfOutcomes() external view returns (uint256);
            function doInitialReport(uint256[] _payoutNumerators, bool _invalid) external returns (bool);
            function contribute(uint256[] _payoutNumerators, bool _invalid, uint256 _amount) external returns (bool);
            function finalize() external returns (bool);
        }

        #[derive(Debug)]
        #[sol(rpc)]
        interface FeeWindow {
            function getStartTime() external view returns (uint256);
            function getEndTime() external view returns (uint256);
        }
    );
}

pub mod time {
    alloy::sol!(
        /// Time controller of test deployments.
        #[derive(Debug)]
        #[sol(rpc)]
        interface Time {
            function getTimestamp() external view returns (uint256);
            function setTimestamp(uint256 _timestamp) external returns (bool);
        }
    );
}
