//! Coinquote Market Data Crate
//!
//! This crate turns free-text crypto queries into USD price replies.
//! It is transport-agnostic: the chat/webhook adapter lives in the server
//! app and only calls [`PriceLookupPipeline::run`].
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |  raw user text   |
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |  AssetResolver   |  (CoinGecko /search, first match wins)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |  PriceFetcher    |  (primary provider, fallback to secondary)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |  format_usd      |  (magnitude-aware precision)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |   reply text     |
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`AssetRef`] - Resolved asset identity (id, display name, symbol)
//! - [`PriceResult`] - USD amount plus which provider supplied it
//! - [`LookupError`] - Failure taxonomy for the resolve/fetch stages
//! - [`PriceLookupPipeline`] - resolve -> fetch -> format -> compose

use std::time::Duration;

/// Default bound on every outbound HTTP call. An unresponsive upstream
/// must not hang a query; a timed-out call fails like any other call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(8);

pub mod errors;
pub mod fetcher;
pub mod format;
pub mod models;
pub mod pipeline;
pub mod provider;
pub mod resolver;

pub use errors::LookupError;
pub use fetcher::PriceFetcher;
pub use format::format_usd;
pub use models::{AssetRef, PriceResult, PriceSource};
pub use pipeline::PriceLookupPipeline;
pub use provider::coingecko::CoinGeckoPrice;
pub use provider::cryptocompare::CryptoComparePrice;
pub use provider::PriceProvider;
pub use resolver::coingecko::CoinGeckoSearch;
pub use resolver::AssetResolver;
