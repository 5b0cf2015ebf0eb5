//! CoinGecko price provider (primary).
//!
//! Uses the public `/simple/price` endpoint, keyed by CoinGecko asset id.
//! The response is a mapping from asset id to a mapping from currency code
//! to price:
//!
//! ```text
//! { "bitcoin": { "usd": 43125.5 } }
//! ```
//!
//! A missing id key or missing "usd" sub-key is treated as a provider
//! failure like any other - the caller falls back to the secondary
//! provider either way.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use rust_decimal::Decimal;
use urlencoding::encode;

use crate::errors::LookupError;
use crate::models::AssetRef;
use crate::provider::PriceProvider;
use crate::DEFAULT_REQUEST_TIMEOUT;

const BASE_URL: &str = "https://api.coingecko.com/api/v3";
const PROVIDER_ID: &str = "COINGECKO";

/// Response from /simple/price: asset id -> currency code -> price
type SimplePriceResponse = HashMap<String, HashMap<String, f64>>;

/// CoinGecko price provider.
pub struct CoinGeckoPrice {
    client: Client,
    base_url: String,
}

impl CoinGeckoPrice {
    /// Create a provider against the public CoinGecko API.
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    /// Create a provider against a custom base URL (tests, proxies).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_base_url_and_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a provider against the public API with an explicit timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_base_url_and_timeout(BASE_URL, timeout)
    }

    /// Create a provider with an explicit per-request timeout.
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

impl Default for CoinGeckoPrice {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceProvider for CoinGeckoPrice {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn usd_price(&self, asset: &AssetRef) -> Result<Decimal, LookupError> {
        let url = format!(
            "{}/simple/price?ids={}&vs_currencies=usd",
            self.base_url,
            encode(&asset.id)
        );

        debug!("Fetching {} from CoinGecko", asset.id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LookupError::upstream(PROVIDER_ID, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Upstream {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        let body: SimplePriceResponse = response
            .json()
            .await
            .map_err(|e| LookupError::upstream(PROVIDER_ID, e))?;

        let price = body
            .get(&asset.id)
            .and_then(|currencies| currencies.get("usd"))
            .copied()
            .ok_or_else(|| LookupError::Upstream {
                provider: PROVIDER_ID.to_string(),
                message: format!("no USD price for '{}' in response", asset.id),
            })?;

        Decimal::try_from(price).map_err(|e| LookupError::upstream(PROVIDER_ID, e))
    }
}
