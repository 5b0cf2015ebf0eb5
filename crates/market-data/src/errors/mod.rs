//! Error types for the price lookup stages.
//!
//! The taxonomy is deliberately coarse: every way an upstream call can go
//! wrong (network failure, timeout, non-success status, malformed body,
//! missing field) collapses into [`LookupError::Upstream`], because the
//! fetch stage treats all of them the same way - fall back to the next
//! provider. The pipeline is the only consumer and translates each variant
//! into a user-facing reply.

use thiserror::Error;

/// Errors produced by the resolve and fetch stages.
#[derive(Error, Debug)]
pub enum LookupError {
    /// The search provider returned zero matches for the query.
    /// User-recoverable: a different query may succeed.
    #[error("no asset found for query: {0}")]
    NotFound(String),

    /// An outbound call to a provider failed for any reason.
    /// Never retried beyond the designed primary->secondary fallback.
    #[error("upstream error from {provider}: {message}")]
    Upstream {
        /// The provider that failed
        provider: String,
        /// Root-cause detail, for logs only - never shown to end users
        message: String,
    },

    /// Both price providers failed for a resolved asset.
    /// A distinct terminal condition: total capability loss, not just
    /// data absence.
    #[error("all price providers failed for {symbol}")]
    AllProvidersFailed {
        /// Ticker symbol of the asset that could not be priced
        symbol: String,
    },
}

impl LookupError {
    /// Build an [`Upstream`](Self::Upstream) error from any displayable cause.
    pub fn upstream(provider: &str, cause: impl std::fmt::Display) -> Self {
        Self::Upstream {
            provider: provider.to_string(),
            message: cause.to_string(),
        }
    }
}
