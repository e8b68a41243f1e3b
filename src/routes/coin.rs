//! Coin quote route: `GET /api/go/coin?symbol=`.
//!
//! ERROR HANDLING
//! ==============
//! Missing symbol or server configuration answers `400`; upstream failures
//! answer `502`. Every error body is the plain-text reason.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::services::coin::{self, CoinError};
use crate::state::AppState;

type ErrorResponse = (StatusCode, String);

#[derive(Debug, Deserialize)]
pub struct CoinQuery {
    pub symbol: Option<String>,
}

pub(crate) fn coin_error_to_response(err: CoinError) -> ErrorResponse {
    let status = match err {
        CoinError::MissingSymbol | CoinError::NotConfigured(_) => StatusCode::BAD_REQUEST,
        CoinError::InvalidUrl(_) => StatusCode::INTERNAL_SERVER_ERROR,
        CoinError::Upstream(_) | CoinError::Decode(_) => StatusCode::BAD_GATEWAY,
    };
    (status, err.to_string())
}

/// `GET /api/go/coin?symbol=` — relay the latest CoinMarketCap quote.
pub async fn get_coin(
    State(state): State<AppState>,
    Query(query): Query<CoinQuery>,
) -> Result<Json<Map<String, Value>>, ErrorResponse> {
    match coin::latest_quote(&state.http, &state.coin, query.symbol.as_deref()).await {
        Ok(quote) => Ok(Json(quote)),
        Err(e) => {
            if !matches!(e, CoinError::MissingSymbol) {
                warn!(symbol = ?query.symbol, error = %e, "coin quote failed");
            }
            Err(coin_error_to_response(e))
        }
    }
}
