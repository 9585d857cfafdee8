use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use foil_core::{Address, ChainId, MAX_ITERATIONS, MarketId, Price, SearchStrategy, U256};
use foil_ports::{ChainDirectory, MarketRepository};
use std::str::FromStr;
use std::sync::Arc;

use crate::application::{GetMaxSizeQuery, GetMaxSizeUseCase};
use crate::infrastructure::QuoteSettings;
use crate::presentation::rest::{ApiError, dto::*};

use super::AppState;

/// GET /ping
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {})
}

/// GET /markets
pub async fn list_markets(State(state): State<Arc<AppState>>) -> Json<MarketsResponse> {
    Json(MarketsResponse {
        chains: state.chains.chain_ids(),
        markets: state.markets.all().await,
    })
}

/// GET /quoter/{chainId}/{marketAddress}/{marketId}
pub async fn max_size(
    State(state): State<Arc<AppState>>,
    Path((chain_id, market_address, market_id)): Path<(String, String, String)>,
    params: Result<Query<MaxSizeParams>, QueryRejection>,
) -> Result<Json<MaxSizeResponse>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::invalid_query(vec![e.body_text()]))?;
    let params = ParsedParams::parse(params, &state.settings).map_err(ApiError::invalid_query)?;

    if !(1..=MAX_ITERATIONS).contains(&params.max_iterations) {
        return Err(ApiError::bad_request(format!(
            "maxIterations must be between 1 and {}",
            MAX_ITERATIONS
        )));
    }

    // A path that cannot name a market is reported like an unknown market
    let (chain_id, market_address, market_id) =
        parse_market_path(&chain_id, &market_address, &market_id)
            .ok_or_else(ApiError::market_not_found)?;

    let use_case = GetMaxSizeUseCase::new(
        Arc::clone(&state.markets),
        Arc::clone(&state.chains),
        state.settings.timeout(),
    );

    let quote = use_case
        .execute(GetMaxSizeQuery {
            chain_id,
            market_address,
            market_id,
            expected_price: params.expected_price,
            collateral_available: params.collateral_available,
            max_iterations: params.max_iterations,
            price_limit: params.price_limit,
            strategy: params.strategy,
        })
        .await?;

    Ok(Json(MaxSizeResponse::from(&quote)))
}

struct ParsedParams {
    expected_price: Price,
    collateral_available: U256,
    max_iterations: u32,
    price_limit: Option<Price>,
    strategy: SearchStrategy,
}

impl ParsedParams {
    fn parse(params: MaxSizeParams, defaults: &QuoteSettings) -> Result<Self, Vec<String>> {
        let mut details = Vec::new();

        let expected_price = required(&mut details, "expectedPrice", params.expected_price)
            .and_then(|raw| parse_field(&mut details, "expectedPrice", &raw, parse_price));
        let collateral_available =
            required(&mut details, "collateralAvailable", params.collateral_available).and_then(
                |raw| parse_field(&mut details, "collateralAvailable", &raw, parse_amount),
            );
        let max_iterations = match params.max_iterations {
            Some(raw) => parse_field(&mut details, "maxIterations", &raw, |s| {
                s.trim().parse::<u32>().ok()
            }),
            None => Some(defaults.default_max_iterations),
        };
        let price_limit = match params.price_limit {
            Some(raw) => parse_field(&mut details, "priceLimit", &raw, parse_price).map(Some),
            None => Some(None),
        };
        let strategy = match params.strategy {
            Some(raw) => match SearchStrategy::from_str(raw.trim()) {
                Ok(strategy) => Some(strategy),
                Err(e) => {
                    details.push(format!("strategy: {}", e));
                    None
                }
            },
            None => Some(defaults.default_strategy),
        };

        match (
            expected_price,
            collateral_available,
            max_iterations,
            price_limit,
            strategy,
        ) {
            (
                Some(expected_price),
                Some(collateral_available),
                Some(max_iterations),
                Some(price_limit),
                Some(strategy),
            ) if details.is_empty() => Ok(ParsedParams {
                expected_price,
                collateral_available,
                max_iterations,
                price_limit,
                strategy,
            }),
            _ => Err(details),
        }
    }
}

fn required(details: &mut Vec<String>, field: &str, value: Option<String>) -> Option<String> {
    if value.is_none() {
        details.push(format!("{}: required", field));
    }
    value
}

fn parse_field<T>(
    details: &mut Vec<String>,
    field: &str,
    raw: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    let parsed = parse(raw);
    if parsed.is_none() {
        details.push(format!("{}: invalid value '{}'", field, raw));
    }
    parsed
}

fn parse_price(raw: &str) -> Option<Price> {
    let raw = raw.trim();
    Price::from_str(raw)
        .or_else(|_| Price::from_scientific(raw))
        .ok()
}

/// Integer amount in the smallest unit, decimal or `0x` hex
fn parse_amount(raw: &str) -> Option<U256> {
    U256::from_str(raw.trim()).ok()
}

fn parse_market_path(
    chain_id: &str,
    market_address: &str,
    market_id: &str,
) -> Option<(ChainId, Address, MarketId)> {
    Some((
        chain_id.parse().ok()?,
        market_address.parse().ok()?,
        market_id.parse().ok()?,
    ))
}
