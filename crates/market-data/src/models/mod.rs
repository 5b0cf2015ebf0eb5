//! Data model for a single price lookup.
//!
//! Nothing here outlives one pipeline invocation: an [`AssetRef`] is built
//! from the first search result, carried through the fetch stage, and
//! dropped with the reply. There is no cache and no persistence.

use rust_decimal::Decimal;

/// Resolved identity of a crypto asset.
#[derive(Clone, Debug)]
pub struct AssetRef {
    /// Opaque provider-specific identifier (e.g. "bitcoin").
    /// Only meaningful for primary-provider lookups.
    pub id: String,

    /// Human-readable name (e.g. "Bitcoin")
    pub display_name: String,

    /// Ticker symbol as returned by search (e.g. "btc"); case-insensitive
    pub symbol: String,
}

impl AssetRef {
    /// The upper-cased ticker, used for display and for
    /// secondary-provider lookups.
    pub fn ticker(&self) -> String {
        self.symbol.to_uppercase()
    }
}

/// Which provider supplied a price.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PriceSource {
    /// The preferred provider answered.
    Primary,
    /// The backup provider answered after the primary failed.
    Secondary,
}

/// Outcome of a successful price fetch.
///
/// A `PriceResult` only exists when a provider call succeeded and returned
/// a usable USD value, so `source` is always meaningful.
#[derive(Clone, Debug)]
pub struct PriceResult {
    /// USD amount
    pub amount: Decimal,
    /// Provider that supplied `amount`
    pub source: PriceSource,
}
