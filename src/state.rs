//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It carries the database pool, one outbound HTTP client (shared so
//! connections to CoinMarketCap are pooled) and the coin proxy settings.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::{COIN_REQUEST_TIMEOUT, CoinSettings};

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub http: reqwest::Client,
    pub coin: Arc<CoinSettings>,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool, http: reqwest::Client, coin: CoinSettings) -> Self {
        Self { pool, http, coin: Arc::new(coin) }
    }
}

/// Outbound client for upstream APIs, bounded by [`COIN_REQUEST_TIMEOUT`].
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized.
pub fn http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().timeout(COIN_REQUEST_TIMEOUT).build()
}
