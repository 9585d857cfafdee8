use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::infrastructure::{InMemoryMarketRepository, QuoteSettings};
use foil_chain::FoilChainDirectory;

/// Application state shared across handlers
pub struct AppState {
    pub markets: Arc<InMemoryMarketRepository>,
    pub chains: Arc<FoilChainDirectory>,
    pub settings: QuoteSettings,
}

impl AppState {
    pub fn new(
        markets: Arc<InMemoryMarketRepository>,
        chains: Arc<FoilChainDirectory>,
        settings: QuoteSettings,
    ) -> Self {
        AppState {
            markets,
            chains,
            settings,
        }
    }
}

/// Create the REST API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/markets", get(handlers::list_markets))
        .route(
            "/quoter/{chain_id}/{market_address}/{market_id}",
            get(handlers::max_size),
        )
        .route(
            "/quoter/{chain_id}/{market_address}/{market_id}/",
            get(handlers::max_size),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
