//! Coin quote service: a thin proxy over CoinMarketCap's latest-quotes API.
//!
//! DESIGN
//! ======
//! The upstream reply is relayed as a JSON object without being typed; the
//! dashboard reads whatever CoinMarketCap sends. The upstream status is not
//! inspected, only whether the body decodes as an object.
//!
//! ERROR HANDLING
//! ==============
//! Request and configuration problems are checked in a fixed order (symbol,
//! API key, base URL, quotes path) so the first missing piece is reported.
//! Upstream transport and decode failures carry the underlying error text.

use reqwest::Url;
use reqwest::header::ACCEPT;
use serde_json::{Map, Value};

use crate::config::{CMC_API_KEY_VAR, CMC_BASE_URL_VAR, CMC_QUOTES_PATH_VAR, CoinSettings};

#[derive(Debug, thiserror::Error)]
pub enum CoinError {
    #[error("Missing Query Param: symbol")]
    MissingSymbol,
    #[error("Server Not Configured. Missing {0}")]
    NotConfigured(&'static str),
    #[error("invalid upstream URL: {0}")]
    InvalidUrl(String),
    #[error("{0}")]
    Upstream(String),
    #[error("{0}")]
    Decode(String),
}

/// A resolved latest-quotes endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotesEndpoint<'a> {
    pub url: Url,
    pub api_key: &'a str,
}

/// Resolve the upstream endpoint from settings.
///
/// # Errors
///
/// Returns [`CoinError::NotConfigured`] naming the first unset variable, or
/// [`CoinError::InvalidUrl`] if base URL plus path is not a URL.
pub fn quotes_endpoint(settings: &CoinSettings) -> Result<QuotesEndpoint<'_>, CoinError> {
    let api_key = settings.api_key.as_deref().ok_or(CoinError::NotConfigured(CMC_API_KEY_VAR))?;
    let base_url = settings.base_url.as_deref().ok_or(CoinError::NotConfigured(CMC_BASE_URL_VAR))?;
    let path = settings.quotes_path.as_deref().ok_or(CoinError::NotConfigured(CMC_QUOTES_PATH_VAR))?;

    let url = Url::parse(&format!("{base_url}{path}")).map_err(|e| CoinError::InvalidUrl(e.to_string()))?;
    Ok(QuotesEndpoint { url, api_key })
}

/// Fetch the latest quote for `symbol` and return the upstream JSON object.
///
/// # Errors
///
/// Returns [`CoinError::MissingSymbol`] for an absent or empty symbol, a
/// configuration error from [`quotes_endpoint`], [`CoinError::Upstream`] if
/// the request fails or times out, and [`CoinError::Decode`] if the reply is
/// not a JSON object.
pub async fn latest_quote(
    http: &reqwest::Client,
    settings: &CoinSettings,
    symbol: Option<&str>,
) -> Result<Map<String, Value>, CoinError> {
    let symbol = symbol.filter(|s| !s.is_empty()).ok_or(CoinError::MissingSymbol)?;
    let endpoint = quotes_endpoint(settings)?;

    let resp = http
        .get(endpoint.url)
        .query(&[("symbol", symbol)])
        .header(CMC_API_KEY_VAR, endpoint.api_key)
        .header(ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| CoinError::Upstream(e.to_string()))?;

    resp.json::<Map<String, Value>>()
        .await
        .map_err(|e| CoinError::Decode(e.to_string()))
}

#[cfg(test)]
#[path = "coin_test.rs"]
mod tests;
