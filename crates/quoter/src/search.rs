use foil_core::{
    Direction, I256, MarketKey, Price, QuoteRequest, QuoteResult, SearchStrategy,
    SimulationOutcome, U256, to_d18, wad,
};
use foil_ports::TradeSimulator;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Instant;

use crate::cancel::QuoteCancellation;
use crate::error::{InvalidQuote, QuoteError};

/// Bisection stops once the bracket is narrower than this many base units
pub const BISECT_CONVERGENCE: u64 = 10;

/// Verdict on a single simulated size
enum Probe {
    Accepted {
        size: I256,
        required_collateral: U256,
        fill_price: Price,
    },
    Rejected,
}

/// Collateral-bounded position-size search
///
/// Each probe waits for the previous one: the next size depends on the last
/// verdict, so probes are never issued concurrently. The quoter holds no
/// mutable state and can serve concurrent requests from one instance.
pub struct PositionSizeQuoter<S: ?Sized> {
    simulator: Arc<S>,
}

impl<S> PositionSizeQuoter<S>
where
    S: TradeSimulator + ?Sized,
{
    pub fn new(simulator: Arc<S>) -> Self {
        Self { simulator }
    }

    /// Find the largest accepted size for `request` on `market`.
    ///
    /// Reverted simulations shrink the size. Any other simulator failure ends
    /// the search with [`QuoteError::Simulator`].
    pub async fn quote(
        &self,
        market: &MarketKey,
        request: &QuoteRequest,
        cancel: &QuoteCancellation,
    ) -> Result<QuoteResult, QuoteError> {
        let direction = validate(request)?;
        let max_size = theoretical_max_size(request)?;

        debug!(
            "{}: {} search for {} (current {}, expected {}, limit {}), max size {}, budget {}",
            market,
            request.strategy,
            direction,
            request.current_price,
            request.expected_price,
            request.effective_price_limit(),
            max_size,
            request.iteration_budget()
        );

        match request.strategy {
            SearchStrategy::Halving => {
                self.halving_search(market, request, direction, max_size, cancel)
                    .await
            }
            SearchStrategy::Bisect => {
                self.bisect_search(market, request, direction, max_size, cancel)
                    .await
            }
        }
    }

    async fn halving_search(
        &self,
        market: &MarketKey,
        request: &QuoteRequest,
        direction: Direction,
        max_size: U256,
        cancel: &QuoteCancellation,
    ) -> Result<QuoteResult, QuoteError> {
        let budget = request.iteration_budget();
        let two = U256::from(2u64);
        let mut size = max_size;
        let mut probes = 0u32;

        while probes < budget {
            if size.is_zero() {
                debug!("{}: size collapsed to zero after {} probes", market, probes);
                break;
            }
            if cancel.is_cancelled() {
                return Err(cancelled(market, probes, cancel));
            }

            probes += 1;
            match self.probe(market, request, direction, size).await? {
                Probe::Accepted {
                    size,
                    required_collateral,
                    fill_price,
                } => {
                    info!(
                        "{}: accepted size {} after {} probes (collateral {}, fill {})",
                        market, size, probes, required_collateral, fill_price
                    );
                    return Ok(build_result(
                        request,
                        direction,
                        size,
                        required_collateral,
                        fill_price,
                        probes,
                    ));
                }
                Probe::Rejected => size /= two,
            }
        }

        warn!(
            "{}: no feasible {} size within {} probes",
            market, direction, probes
        );
        Err(QuoteError::NoFeasibleSize { probes })
    }

    async fn bisect_search(
        &self,
        market: &MarketKey,
        request: &QuoteRequest,
        direction: Direction,
        max_size: U256,
        cancel: &QuoteCancellation,
    ) -> Result<QuoteResult, QuoteError> {
        let budget = request.iteration_budget();
        let two = U256::from(2u64);
        let convergence = U256::from(BISECT_CONVERGENCE);
        let mut low = U256::ZERO;
        let mut high = max_size;
        let mut best: Option<(I256, U256, Price)> = None;
        let mut probes = 0u32;

        while probes < budget {
            if high - low < convergence {
                debug!("{}: bisection converged after {} probes", market, probes);
                break;
            }
            if cancel.is_cancelled() {
                return Err(cancelled(market, probes, cancel));
            }

            let mid = low + (high - low) / two;
            probes += 1;
            match self.probe(market, request, direction, mid).await? {
                Probe::Accepted {
                    size,
                    required_collateral,
                    fill_price,
                } => {
                    best = Some((size, required_collateral, fill_price));
                    low = mid;
                }
                Probe::Rejected => high = mid,
            }
        }

        match best {
            Some((size, required_collateral, fill_price)) => {
                info!(
                    "{}: largest accepted size {} after {} probes (collateral {}, fill {})",
                    market, size, probes, required_collateral, fill_price
                );
                Ok(build_result(
                    request,
                    direction,
                    size,
                    required_collateral,
                    fill_price,
                    probes,
                ))
            }
            None => {
                warn!(
                    "{}: no feasible {} size within {} probes",
                    market, direction, probes
                );
                Err(QuoteError::NoFeasibleSize { probes })
            }
        }
    }

    async fn probe(
        &self,
        market: &MarketKey,
        request: &QuoteRequest,
        direction: Direction,
        magnitude: U256,
    ) -> Result<Probe, QuoteError> {
        let size = direction
            .sign(magnitude)
            .ok_or(InvalidQuote::CollateralOverflow)?;

        match self.simulator.simulate(market, size).await {
            Ok(outcome) => Ok(assess(request, direction, size, &outcome)),
            Err(err) if err.is_revert() => {
                debug!("{}: size {} rejected ({})", market, size, err);
                Ok(Probe::Rejected)
            }
            Err(err) => {
                warn!("{}: simulating size {} failed: {}", market, size, err);
                Err(QuoteError::Simulator(err))
            }
        }
    }
}

fn cancelled(market: &MarketKey, probes: u32, cancel: &QuoteCancellation) -> QuoteError {
    match cancel.deadline() {
        Some(deadline) if Instant::now() >= deadline => info!(
            "{}: deadline passed {:?} ago, stopping after {} probes",
            market,
            deadline.elapsed(),
            probes
        ),
        _ => info!("{}: quote cancelled after {} probes", market, probes),
    }
    QuoteError::Cancelled { probes }
}

/// Upper bound for the search: `collateral * 1e18 / currentPrice` in 18-decimal units
pub fn theoretical_max_size(request: &QuoteRequest) -> Result<U256, InvalidQuote> {
    let current = to_d18(request.current_price)
        .filter(|price| !price.is_zero())
        .ok_or(InvalidQuote::NonPositiveCurrentPrice)?;

    let scaled = request
        .collateral_available
        .checked_mul(wad())
        .ok_or(InvalidQuote::CollateralOverflow)?;

    let max_size = scaled / current;
    if max_size > I256::MAX.into_raw() {
        return Err(InvalidQuote::CollateralOverflow);
    }
    Ok(max_size)
}

fn validate(request: &QuoteRequest) -> Result<Direction, InvalidQuote> {
    if request.current_price <= Price::ZERO {
        return Err(InvalidQuote::NonPositiveCurrentPrice);
    }
    if request.expected_price <= Price::ZERO {
        return Err(InvalidQuote::NonPositiveExpectedPrice);
    }
    request.direction().ok_or(InvalidQuote::NoDirection)
}

fn assess(
    request: &QuoteRequest,
    direction: Direction,
    size: I256,
    outcome: &SimulationOutcome,
) -> Probe {
    if outcome.required_collateral > request.collateral_available {
        debug!(
            "size {} rejected (collateral {} exceeds available {})",
            size, outcome.required_collateral, request.collateral_available
        );
        return Probe::Rejected;
    }

    // Older market contracts only report collateral
    let fill_price = outcome.fill_price().unwrap_or_else(|| {
        warn!(
            "simulator reported no fill price for size {}, assuming expected price {}",
            size, request.expected_price
        );
        request.expected_price
    });

    let limit = request.effective_price_limit();
    if direction.accepts_fill(fill_price, limit, request.expected_price) {
        Probe::Accepted {
            size,
            required_collateral: outcome.required_collateral,
            fill_price,
        }
    } else {
        debug!(
            "size {} rejected (fill {} outside ({}, {}])",
            size, fill_price, limit, request.expected_price
        );
        Probe::Rejected
    }
}

fn build_result(
    request: &QuoteRequest,
    direction: Direction,
    size: I256,
    required_collateral: U256,
    fill_price: Price,
    probes: u32,
) -> QuoteResult {
    QuoteResult {
        direction,
        size,
        current_price: request.current_price,
        expected_price: request.expected_price,
        collateral_available: request.collateral_available,
        required_collateral,
        fill_price,
        probes,
    }
}
