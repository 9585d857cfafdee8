use foil_core::{ChainId, Direction, Market, QuoteResult};
use serde::{Deserialize, Serialize};

/// Raw query of `GET /quoter/...`; values are parsed by the handler so that
/// every problem is reported at once.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxSizeParams {
    #[serde(default)]
    pub expected_price: Option<String>,
    #[serde(default)]
    pub collateral_available: Option<String>,
    #[serde(default)]
    pub max_iterations: Option<String>,
    #[serde(default)]
    pub price_limit: Option<String>,
    #[serde(default)]
    pub strategy: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxSizeResponse {
    pub direction: Direction,
    /// Signed size in 18-decimal units, negative for shorts
    pub max_size: String,
    pub current_price: String,
    pub expected_price: String,
    pub collateral_available: String,
}

impl From<&QuoteResult> for MaxSizeResponse {
    fn from(quote: &QuoteResult) -> Self {
        MaxSizeResponse {
            direction: quote.direction,
            max_size: quote.size.to_string(),
            current_price: quote.current_price.normalize().to_string(),
            expected_price: quote.expected_price.normalize().to_string(),
            collateral_available: quote.collateral_available.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketsResponse {
    pub chains: Vec<ChainId>,
    pub markets: Vec<Market>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PingResponse {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        ErrorResponse {
            error: error.into(),
            details: Vec::new(),
        }
    }
}
