use foil_core::{
    Address, ChainId, MarketId, Price, QuoteRequest, QuoteResult, SearchStrategy, U256, from_d18,
};
use foil_ports::{ChainDirectory, MarketRepository, PriceSourceError, SimulationError};
use foil_quoter::{InvalidQuote, PositionSizeQuoter, QuoteCancellation, QuoteError};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct GetMaxSizeQuery {
    pub chain_id: ChainId,
    pub market_address: Address,
    pub market_id: MarketId,
    pub expected_price: Price,
    pub collateral_available: U256,
    pub max_iterations: u32,
    pub price_limit: Option<Price>,
    pub strategy: SearchStrategy,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MaxSizeError {
    #[error("Market not found")]
    MarketNotFound,

    #[error("Current price not found")]
    CurrentPriceNotFound,

    #[error("Chain {0} is not configured")]
    ChainNotConfigured(ChainId),

    #[error(transparent)]
    InvalidRequest(#[from] InvalidQuote),

    #[error("Could not find a valid position size that satisfies the price constraints")]
    NoFeasibleSize { probes: u32 },

    #[error("Quote timed out after {probes} probes")]
    TimedOut { probes: u32 },

    #[error("Reference price unavailable: {0}")]
    PriceSource(PriceSourceError),

    #[error("Simulator failure: {0}")]
    Simulator(SimulationError),
}

impl From<QuoteError> for MaxSizeError {
    fn from(err: QuoteError) -> Self {
        match err {
            QuoteError::InvalidRequest(invalid) => MaxSizeError::InvalidRequest(invalid),
            QuoteError::NoFeasibleSize { probes } => MaxSizeError::NoFeasibleSize { probes },
            QuoteError::Cancelled { probes } => MaxSizeError::TimedOut { probes },
            QuoteError::Simulator(e) => MaxSizeError::Simulator(e),
        }
    }
}

/// Quotes the largest position a trader can open on a known market with the
/// collateral they hold.
pub struct GetMaxSizeUseCase<M, D>
where
    M: MarketRepository,
    D: ChainDirectory + ?Sized,
{
    markets: Arc<M>,
    chains: Arc<D>,
    timeout: Option<Duration>,
}

impl<M, D> GetMaxSizeUseCase<M, D>
where
    M: MarketRepository,
    D: ChainDirectory + ?Sized,
{
    pub fn new(markets: Arc<M>, chains: Arc<D>, timeout: Option<Duration>) -> Self {
        Self {
            markets,
            chains,
            timeout,
        }
    }

    pub async fn execute(&self, query: GetMaxSizeQuery) -> Result<QuoteResult, MaxSizeError> {
        let market = self
            .markets
            .find(query.chain_id, &query.market_address, query.market_id)
            .await
            .ok_or(MaxSizeError::MarketNotFound)?;

        let chain = self
            .chains
            .chain(market.key.chain_id)
            .ok_or(MaxSizeError::ChainNotConfigured(market.key.chain_id))?;

        // A zero reference price means the market has no price yet
        let raw_price = chain
            .prices
            .reference_price(&market.key)
            .await
            .map_err(MaxSizeError::PriceSource)?;
        if raw_price.is_zero() {
            return Err(MaxSizeError::CurrentPriceNotFound);
        }
        let current_price = from_d18(raw_price).ok_or_else(|| {
            MaxSizeError::PriceSource(PriceSourceError::Malformed(format!(
                "reference price {} out of range",
                raw_price
            )))
        })?;

        let mut request =
            QuoteRequest::new(current_price, query.expected_price, query.collateral_available)
                .with_max_iterations(query.max_iterations)
                .with_strategy(query.strategy);
        if let Some(limit) = query.price_limit {
            request = request.with_price_limit(limit);
        }

        let cancel = match self.timeout {
            Some(timeout) => QuoteCancellation::with_timeout(timeout),
            None => QuoteCancellation::new(),
        };

        let quoter = PositionSizeQuoter::new(Arc::clone(&chain.simulator));
        let result = quoter.quote(&market.key, &request, &cancel).await;

        match &result {
            Ok(quote) => tracing::info!(
                market = %market.key,
                direction = %quote.direction,
                size = %quote.size,
                probes = quote.probes,
                "Quoted max size"
            ),
            Err(e) => {
                tracing::info!(market = %market.key, probes = e.probes(), "Quote failed: {}", e)
            }
        }

        result.map_err(MaxSizeError::from)
    }
}
