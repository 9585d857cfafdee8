use crate::application::MaxSizeError;
use crate::presentation::rest::dto::ErrorResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// API error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Vec<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn invalid_query(details: Vec<String>) -> Self {
        ApiError {
            details,
            ..Self::bad_request("Invalid query parameters")
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn market_not_found() -> Self {
        Self::not_found("Market not found")
    }

    pub fn timeout() -> Self {
        ApiError {
            status: StatusCode::GATEWAY_TIMEOUT,
            message: "Quote timed out".to_string(),
            details: Vec::new(),
        }
    }

    pub fn internal() -> Self {
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Internal server error".to_string(),
            details: Vec::new(),
        }
    }
}

impl From<MaxSizeError> for ApiError {
    fn from(err: MaxSizeError) -> Self {
        match err {
            MaxSizeError::MarketNotFound | MaxSizeError::CurrentPriceNotFound => {
                Self::not_found(err.to_string())
            }
            MaxSizeError::InvalidRequest(_) | MaxSizeError::NoFeasibleSize { .. } => {
                Self::bad_request(err.to_string())
            }
            MaxSizeError::TimedOut { .. } => Self::timeout(),
            MaxSizeError::ChainNotConfigured(_)
            | MaxSizeError::PriceSource(_)
            | MaxSizeError::Simulator(_) => {
                tracing::error!("Error in quoter endpoint: {}", err);
                Self::internal()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
            details: self.details,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foil_ports::SimulationError;
    use foil_quoter::InvalidQuote;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (MaxSizeError::MarketNotFound, StatusCode::NOT_FOUND),
            (MaxSizeError::CurrentPriceNotFound, StatusCode::NOT_FOUND),
            (
                MaxSizeError::InvalidRequest(InvalidQuote::NoDirection),
                StatusCode::BAD_REQUEST,
            ),
            (
                MaxSizeError::NoFeasibleSize { probes: 10 },
                StatusCode::BAD_REQUEST,
            ),
            (
                MaxSizeError::TimedOut { probes: 3 },
                StatusCode::GATEWAY_TIMEOUT,
            ),
            (
                MaxSizeError::Simulator(SimulationError::Upstream("timeout".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[test]
    fn test_internal_errors_hide_cause() {
        let err = ApiError::from(MaxSizeError::Simulator(SimulationError::Malformed(
            "short return data".into(),
        )));

        assert_eq!(err.message, "Internal server error");
        assert!(err.details.is_empty());
    }
}
