//! The resolve -> fetch -> format -> compose pipeline.
//!
//! [`PriceLookupPipeline::run`] is the error boundary for a whole query:
//! every stage failure is translated into a user-facing reply here, and
//! nothing propagates to the transport adapter. Root-cause detail goes to
//! the logs only.

use std::sync::Arc;

use log::{error, warn};

use crate::errors::LookupError;
use crate::fetcher::PriceFetcher;
use crate::format::format_usd;
use crate::models::PriceSource;
use crate::resolver::AssetResolver;

/// Reply for an empty query.
const USAGE_HINT: &str =
    "Send a crypto name or symbol (e.g. \"bitcoin\" or \"btc\") and I'll reply with the USD price.";

/// Reply when the search call itself failed.
const SEARCH_FAILED: &str = "\u{26a0}\u{fe0f} Error searching for that asset. Please try again.";

/// Reply when neither price provider could answer.
const PROVIDERS_DOWN: &str =
    "\u{26a0}\u{fe0f} Both price providers failed. Please try again later.";

/// Annotation appended when the value came from the backup provider.
/// Users must never mistake a fallback value for a primary one.
const BACKUP_NOTE: &str = " (via backup)";

/// Orchestrates one query from raw text to reply text.
///
/// Holds no mutable state: concurrent runs are fully independent and the
/// same input against the same provider behavior yields the same reply.
pub struct PriceLookupPipeline {
    resolver: Arc<dyn AssetResolver>,
    fetcher: PriceFetcher,
}

impl PriceLookupPipeline {
    /// Create a pipeline over the given resolver and fetcher.
    pub fn new(resolver: Arc<dyn AssetResolver>, fetcher: PriceFetcher) -> Self {
        Self { resolver, fetcher }
    }

    /// Turn raw user text into exactly one reply.
    ///
    /// Never errors outward; every failure branch produces a textual
    /// reply instead.
    pub async fn run(&self, raw_text: &str) -> String {
        let trimmed = raw_text.trim();
        let query = trimmed.to_lowercase();

        if query.is_empty() {
            return USAGE_HINT.to_string();
        }

        let asset = match self.resolver.resolve(&query).await {
            Ok(asset) => asset,
            Err(LookupError::NotFound(_)) => {
                return format!("\u{274c} No match found for '{}'.", trimmed);
            }
            Err(e) => {
                warn!("Asset search failed for '{}': {}", query, e);
                return SEARCH_FAILED.to_string();
            }
        };

        let price = match self.fetcher.fetch(&asset).await {
            Ok(price) => price,
            Err(e) => {
                error!("Price fetch failed for {}: {}", asset.ticker(), e);
                return PROVIDERS_DOWN.to_string();
            }
        };

        let note = match price.source {
            PriceSource::Primary => "",
            PriceSource::Secondary => BACKUP_NOTE,
        };

        format!(
            "<b>{}</b> ({})\n<b>Price (USD):</b> {}{}",
            asset.ticker(),
            asset.display_name,
            format_usd(price.amount),
            note
        )
    }
}
