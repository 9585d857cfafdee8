//! Behavioural properties of the position-size search
//!
//! Each test drives the quoter with a deterministic stub simulator and checks
//! the observable contract: sizes, signs, probe counts and failure kinds.

use async_trait::async_trait;
use foil_core::{
    Address, Direction, I256, MarketKey, QuoteRequest, SearchStrategy, SimulationOutcome, U256,
    wad,
};
use foil_ports::{SimulationError, SimulationResult, TradeSimulator};
use foil_quoter::{PositionSizeQuoter, QuoteCancellation, QuoteError, theoretical_max_size};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

// ============================================================================
// Test Fixtures
// ============================================================================

/// Market contract stub: sizes up to `max_units` fill at `fill_price`,
/// requiring `collateral_per_unit` per whole unit; larger sizes revert.
struct MarketStub {
    max_size: U256,
    fill_price: U256,
    collateral_per_unit: U256,
    calls: Mutex<Vec<I256>>,
}

impl MarketStub {
    fn new(max_units: u64, fill_price: u64, collateral_per_unit: u64) -> Arc<Self> {
        Arc::new(Self {
            max_size: units(max_units),
            fill_price: units(fill_price),
            collateral_per_unit: U256::from(collateral_per_unit),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn always_reverting() -> Arc<Self> {
        Self::new(0, 0, 0)
    }

    fn calls(&self) -> Vec<I256> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl TradeSimulator for MarketStub {
    async fn simulate(&self, _market: &MarketKey, size: I256) -> SimulationResult<SimulationOutcome> {
        self.calls.lock().push(size);

        let magnitude = size.unsigned_abs();
        if magnitude.is_zero() || magnitude > self.max_size {
            return Err(SimulationError::Reverted("Insufficient liquidity".into()));
        }
        Ok(SimulationOutcome::new(
            magnitude * self.collateral_per_unit,
            self.fill_price,
        ))
    }

    fn name(&self) -> &str {
        "MarketStub"
    }
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn units(n: u64) -> U256 {
    U256::from(n) * wad()
}

fn market() -> MarketKey {
    MarketKey::new(8453, Address::repeat_byte(0xf0), 1)
}

async fn run(
    stub: &Arc<MarketStub>,
    request: &QuoteRequest,
) -> Result<foil_core::QuoteResult, QuoteError> {
    PositionSizeQuoter::new(Arc::clone(stub))
        .quote(&market(), request, &QuoteCancellation::new())
        .await
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn test_long_scenario_within_band_and_budget() {
    init_logger();
    // Accepts any size up to 80 units at exactly 11, 9 units of collateral per unit
    let stub = MarketStub::new(80, 11, 9);
    let request = QuoteRequest::new(dec!(10), dec!(12), units(1000));

    let result = run(&stub, &request).await.unwrap();

    assert_eq!(result.direction, Direction::Long);
    assert!(result.size.is_positive());
    assert!(result.fill_price > dec!(10) && result.fill_price <= dec!(12));
    assert!(result.required_collateral <= units(1000));
    // 100 units reverts, 50 units fits
    assert_eq!(result.size, I256::try_from(units(50)).unwrap());
    assert_eq!(result.probes, 2);
}

#[tokio::test]
async fn test_short_scenario_always_reverting() {
    init_logger();
    let stub = MarketStub::always_reverting();
    let request = QuoteRequest::new(dec!(10), dec!(8), units(1000));

    let err = run(&stub, &request).await.unwrap_err();

    assert_eq!(err, QuoteError::NoFeasibleSize { probes: 10 });
    assert_eq!(stub.calls().len(), 10);
    assert!(stub.calls().iter().all(|size| size.is_negative()));
}

#[tokio::test]
async fn test_equal_prices_make_no_simulator_calls() {
    let stub = MarketStub::new(80, 11, 1);
    let request = QuoteRequest::new(dec!(10), dec!(10), units(1000));

    let err = run(&stub, &request).await.unwrap_err();

    assert!(matches!(err, QuoteError::InvalidRequest(_)));
    assert!(stub.calls().is_empty());
}

// ============================================================================
// Properties
// ============================================================================

#[tokio::test]
async fn test_first_probe_acceptance_returns_theoretical_max() {
    let stub = MarketStub::new(1_000, 11, 1);
    let request = QuoteRequest::new(dec!(10), dec!(12), units(1000));

    let result = run(&stub, &request).await.unwrap();

    let max = theoretical_max_size(&request).unwrap();
    assert_eq!(result.size.into_raw(), max);
    assert_eq!(result.probes, 1);
}

#[tokio::test]
async fn test_exhaustion_never_exceeds_budget() {
    for budget in 1..=10u32 {
        let stub = MarketStub::always_reverting();
        let request = QuoteRequest::new(dec!(10), dec!(12), units(1000)).with_max_iterations(budget);

        let err = run(&stub, &request).await.unwrap_err();

        assert_eq!(err, QuoteError::NoFeasibleSize { probes: budget });
        assert_eq!(stub.calls().len(), budget as usize);
    }
}

#[tokio::test]
async fn test_budget_above_ten_is_clamped() {
    let stub = MarketStub::always_reverting();
    let request = QuoteRequest::new(dec!(10), dec!(12), units(1000)).with_max_iterations(64);

    let err = run(&stub, &request).await.unwrap_err();

    assert_eq!(err.probes(), 10);
}

#[tokio::test]
async fn test_sign_matches_direction() {
    let cases = [
        (dec!(10), dec!(12), true),
        (dec!(10), dec!(10.5), true),
        (dec!(10), dec!(8), false),
        (dec!(10), dec!(9), false),
    ];

    for (current, expected, long) in cases {
        let fill = if long { 10 } else { 9 };
        let stub = MarketStub::new(1_000, fill, 1);
        let request = QuoteRequest::new(current, expected, units(1000))
            .with_price_limit(if long { dec!(9) } else { dec!(10) });

        let result = run(&stub, &request).await.unwrap();

        assert_eq!(result.size.is_positive(), long, "{} -> {}", current, expected);
        assert_eq!(result.direction.is_long(), long);
    }
}

#[tokio::test]
async fn test_probe_magnitudes_halve_until_acceptance() {
    let stub = MarketStub::new(7, 11, 1);
    let request = QuoteRequest::new(dec!(10), dec!(12), units(1000));

    let result = run(&stub, &request).await.unwrap();

    let max = theoretical_max_size(&request).unwrap();
    let calls = stub.calls();
    for (k, size) in calls.iter().enumerate() {
        assert_eq!(size.into_raw(), max >> k);
    }
    // 100, 50, 25, 12.5, 6.25 units
    assert_eq!(calls.len(), 5);
    assert_eq!(result.size.into_raw(), max >> 4);
}

#[tokio::test]
async fn test_identical_inputs_give_identical_results() {
    let request = QuoteRequest::new(dec!(3.7), dec!(4.1), units(250)).with_max_iterations(7);

    let first = run(&MarketStub::new(12, 4, 1), &request).await;
    let second = run(&MarketStub::new(12, 4, 1), &request).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_bisect_never_exceeds_feasible_size() {
    let stub = MarketStub::new(33, 11, 1);
    let request =
        QuoteRequest::new(dec!(10), dec!(12), units(1000)).with_strategy(SearchStrategy::Bisect);

    let result = run(&stub, &request).await.unwrap();

    assert!(result.size.into_raw() <= units(33));
    assert!(result.size.into_raw() > units(32));
    assert!(result.probes <= 10);
}

#[tokio::test]
async fn test_expired_deadline_is_distinct_from_exhaustion() {
    let stub = MarketStub::new(80, 11, 1);
    let request = QuoteRequest::new(dec!(10), dec!(12), units(1000));
    let cancel = QuoteCancellation::with_deadline(std::time::Instant::now());

    let err = PositionSizeQuoter::new(Arc::clone(&stub))
        .quote(&market(), &request, &cancel)
        .await
        .unwrap_err();

    assert_eq!(err, QuoteError::Cancelled { probes: 0 });
    assert!(stub.calls().is_empty());
}

#[tokio::test]
async fn test_negative_current_price_rejected() {
    let stub = MarketStub::new(80, 11, 1);
    let request = QuoteRequest::new(Decimal::NEGATIVE_ONE, dec!(12), units(1000));

    let err = run(&stub, &request).await.unwrap_err();

    assert!(matches!(err, QuoteError::InvalidRequest(_)));
    assert!(stub.calls().is_empty());
}
