//! Primary/secondary price failover.
//!
//! The fetcher owns the one piece of retry policy this system has: try the
//! primary provider, and on ANY failure try the secondary exactly once.
//! Failure causes are not distinguished for control flow - a timeout, a
//! 500, and a well-formed response missing the expected field all route to
//! the secondary the same way. There is no third provider, no backoff and
//! no circuit breaker; that is a deliberate simplicity bound.

use std::sync::Arc;

use log::{error, info, warn};

use crate::errors::LookupError;
use crate::models::{AssetRef, PriceResult, PriceSource};
use crate::provider::PriceProvider;

/// Two-provider failover fetcher.
pub struct PriceFetcher {
    primary: Arc<dyn PriceProvider>,
    secondary: Arc<dyn PriceProvider>,
}

impl PriceFetcher {
    /// Create a fetcher with the given primary and secondary providers.
    pub fn new(primary: Arc<dyn PriceProvider>, secondary: Arc<dyn PriceProvider>) -> Self {
        Self { primary, secondary }
    }

    /// Fetch the USD price for a resolved asset.
    ///
    /// Returns the primary provider's value when it answers, otherwise the
    /// secondary's, tagged with [`PriceSource`] so the caller can tell the
    /// user where the number came from. Logging here is advisory and never
    /// affects control flow.
    pub async fn fetch(&self, asset: &AssetRef) -> Result<PriceResult, LookupError> {
        let primary_error = match self.primary.usd_price(asset).await {
            Ok(amount) => {
                info!(
                    "Fetched {} = {} USD from '{}'",
                    asset.ticker(),
                    amount,
                    self.primary.id()
                );
                return Ok(PriceResult {
                    amount,
                    source: PriceSource::Primary,
                });
            }
            Err(e) => e,
        };

        warn!(
            "Primary provider '{}' failed for {} ({}), trying '{}'",
            self.primary.id(),
            asset.ticker(),
            primary_error,
            self.secondary.id()
        );

        match self.secondary.usd_price(asset).await {
            Ok(amount) => {
                info!(
                    "Fetched {} = {} USD from backup '{}'",
                    asset.ticker(),
                    amount,
                    self.secondary.id()
                );
                Ok(PriceResult {
                    amount,
                    source: PriceSource::Secondary,
                })
            }
            Err(secondary_error) => {
                error!(
                    "Both providers failed for {}: '{}' ({}), '{}' ({})",
                    asset.ticker(),
                    self.primary.id(),
                    primary_error,
                    self.secondary.id(),
                    secondary_error
                );
                Err(LookupError::AllProvidersFailed {
                    symbol: asset.ticker(),
                })
            }
        }
    }
}
