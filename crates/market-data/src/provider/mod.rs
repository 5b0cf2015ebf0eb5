//! Price provider trait definitions.
//!
//! A provider answers one question: what is this asset worth in USD right
//! now. Each implementation talks to one external API; the failover order
//! between them lives in [`crate::fetcher`], not here.

pub mod coingecko;
pub mod cryptocompare;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::LookupError;
use crate::models::AssetRef;

/// Trait for USD price providers.
///
/// Implement this to add a new price source. Implementations make a
/// single attempt per call - no internal retries.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "COINGECKO", "CRYPTOCOMPARE".
    /// Used for logging and error context.
    fn id(&self) -> &'static str;

    /// Fetch the current USD price for an asset.
    ///
    /// Which part of the [`AssetRef`] identifies the asset is up to the
    /// provider: CoinGecko keys by `id`, CryptoCompare by the upper-cased
    /// `symbol`.
    async fn usd_price(&self, asset: &AssetRef) -> Result<Decimal, LookupError>;
}
