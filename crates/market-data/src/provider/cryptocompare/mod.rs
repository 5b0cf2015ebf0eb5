//! CryptoCompare price provider (secondary).
//!
//! Uses the public `/data/price` endpoint, keyed by the upper-cased ticker
//! symbol. The response is a flat mapping from currency code to price:
//!
//! ```text
//! { "USD": 43125.5 }
//! ```
//!
//! CryptoCompare reports unknown symbols with a 200 response whose body
//! lacks the "USD" key (it carries an error envelope instead), so the
//! missing-key rule also covers symbols the provider does not recognize.

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

const BASE_URL: &str = "https://min-api.cryptocompare.com";
const PROVIDER_ID: &str = "CRYPTOCOMPARE";

/// Response from /data/price: currency code -> price.
/// Error envelopes ({"Response":"Error",...}) deserialize to a map
/// without the "USD" key because non-numeric fields are ignored.
type PriceResponse = HashMap<String, f64>;

/// CryptoCompare price provider.
pub struct CryptoComparePrice {
    client: Client,
    base_url: String,
}

impl CryptoComparePrice {
    /// Create a provider against the public CryptoCompare API.
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

impl Default for CryptoComparePrice {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceProvider for CryptoComparePrice {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn usd_price(&self, asset: &AssetRef) -> Result<Decimal, LookupError> {
        let symbol = asset.ticker();
        let url = format!(
            "{}/data/price?fsym={}&tsyms=USD",
            self.base_url,
            encode(&symbol)
        );

        debug!("Fetching {} from CryptoCompare", symbol);

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

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LookupError::upstream(PROVIDER_ID, e))?;

        let rates: PriceResponse = body
            .as_object()
            .map(|map| {
                map.iter()
                    .filter_map(|(k, v)| v.as_f64().map(|n| (k.clone(), n)))
                    .collect()
            })
            .unwrap_or_default();

        let price = rates.get("USD").copied().ok_or_else(|| LookupError::Upstream {
            provider: PROVIDER_ID.to_string(),
            message: format!("no USD price for '{}' in response", symbol),
        })?;

        Decimal::try_from(price).map_err(|e| LookupError::upstream(PROVIDER_ID, e))
    }
}
