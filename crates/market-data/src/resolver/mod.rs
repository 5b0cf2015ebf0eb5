//! Free-text to asset resolution.
//!
//! The resolver turns whatever the user typed ("bitcoin", "btc",
//! "dogecoi") into a canonical [`AssetRef`] by querying a search service.

pub mod coingecko;

use async_trait::async_trait;

use crate::errors::LookupError;
use crate::models::AssetRef;

/// Trait for asset search services.
///
/// Implementations make a single attempt; the pipeline decides the
/// user-facing behavior on failure.
#[async_trait]
pub trait AssetResolver: Send + Sync {
    /// Resolve a non-empty, trimmed, lower-cased query to the
    /// best-matching asset.
    ///
    /// Returns [`LookupError::NotFound`] when the service reports zero
    /// matches and [`LookupError::Upstream`] when the call itself fails.
    async fn resolve(&self, query: &str) -> Result<AssetRef, LookupError>;
}
