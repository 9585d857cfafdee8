//! Foil market group contract interface.

use alloy::sol;

sol! {
    #[derive(Debug)]
    interface IFoil {
        function getReferencePrice(uint256 epochId) external view returns (uint256 price18Digits);

        function quoteCreateTraderPosition(uint256 epochId, int256 size)
            external
            returns (uint256 requiredCollateral, uint256 fillPrice, uint256 price18DigitsAfterTrade);
    }
}
