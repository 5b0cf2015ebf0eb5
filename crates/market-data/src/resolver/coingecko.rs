//! CoinGecko search resolver.
//!
//! Uses the public `/search` endpoint. CoinGecko ranks results by
//! relevance, and we trust that ranking: the first entry wins, with no
//! client-side re-ranking. An empty `coins` list is a valid response and
//! maps to [`LookupError::NotFound`].

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use urlencoding::encode;

use crate::errors::LookupError;
use crate::models::AssetRef;
use crate::resolver::AssetResolver;
use crate::DEFAULT_REQUEST_TIMEOUT;

const BASE_URL: &str = "https://api.coingecko.com/api/v3";
const RESOLVER_ID: &str = "COINGECKO_SEARCH";

/// Response from the /search endpoint
#[derive(Debug, Deserialize)]
struct SearchResponse {
    /// Matching coins, ordered by relevance
    #[serde(default)]
    coins: Vec<SearchCoin>,
}

/// A single coin entry in the search response
#[derive(Debug, Deserialize)]
struct SearchCoin {
    /// CoinGecko asset id (e.g. "bitcoin")
    id: String,
    /// Display name (e.g. "Bitcoin")
    name: String,
    /// Ticker symbol (e.g. "BTC")
    symbol: String,
}

/// Asset resolver backed by CoinGecko's search API.
pub struct CoinGeckoSearch {
    client: Client,
    base_url: String,
}

impl CoinGeckoSearch {
    /// Create a resolver against the public CoinGecko API.
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    /// Create a resolver against a custom base URL (tests, proxies).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_base_url_and_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a resolver against the public API with an explicit timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_base_url_and_timeout(BASE_URL, timeout)
    }

    /// Create a resolver with an explicit per-request timeout.
    pub fn with_base_url_and_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

impl Default for CoinGeckoSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssetResolver for CoinGeckoSearch {
    async fn resolve(&self, query: &str) -> Result<AssetRef, LookupError> {
        let url = format!("{}/search?query={}", self.base_url, encode(query));

        debug!("Searching CoinGecko for '{}'", query);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LookupError::upstream(RESOLVER_ID, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Upstream {
                provider: RESOLVER_ID.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| LookupError::upstream(RESOLVER_ID, e))?;

        let coin = body
            .coins
            .into_iter()
            .next()
            .ok_or_else(|| LookupError::NotFound(query.to_string()))?;

        debug!(
            "Resolved '{}' to {} ({})",
            query, coin.id, coin.symbol
        );

        Ok(AssetRef {
            id: coin.id,
            display_name: coin.name,
            symbol: coin.symbol,
        })
    }
}
