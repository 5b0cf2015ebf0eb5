use std::sync::Arc;

use coinquote_market_data::{
    AssetResolver, CoinGeckoPrice, CoinGeckoSearch, CryptoComparePrice, PriceFetcher,
    PriceLookupPipeline, PriceProvider,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use crate::telegram::ReplySink;

/// Shared, read-only application state. Nothing in here mutates after
/// startup; concurrent webhook deliveries share it freely.
pub struct AppState {
    /// Expected webhook path token (the bot token)
    pub bot_token: String,
    pub pipeline: Arc<PriceLookupPipeline>,
    pub replier: Arc<dyn ReplySink>,
}

pub fn init_tracing() {
    let log_format = std::env::var("CQ_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

/// Wire the resolver, providers and pipeline from configuration.
///
/// The reply sink is passed in rather than built here so that the binary
/// can hand over a real Telegram client and tests can hand over a
/// recorder.
pub fn build_state(config: &Config, replier: Arc<dyn ReplySink>) -> Arc<AppState> {
    let timeout = config.request_timeout;

    let resolver: Arc<dyn AssetResolver> = Arc::new(match &config.coingecko_url {
        Some(url) => CoinGeckoSearch::with_base_url_and_timeout(url, timeout),
        None => CoinGeckoSearch::with_timeout(timeout),
    });

    let primary: Arc<dyn PriceProvider> = Arc::new(match &config.coingecko_url {
        Some(url) => CoinGeckoPrice::with_base_url_and_timeout(url, timeout),
        None => CoinGeckoPrice::with_timeout(timeout),
    });

    let secondary: Arc<dyn PriceProvider> = Arc::new(match &config.cryptocompare_url {
        Some(url) => CryptoComparePrice::with_base_url_and_timeout(url, timeout),
        None => CryptoComparePrice::with_timeout(timeout),
    });

    let pipeline = Arc::new(PriceLookupPipeline::new(
        resolver,
        PriceFetcher::new(primary, secondary),
    ));

    Arc::new(AppState {
        bot_token: config.bot_token.clone(),
        pipeline,
        replier,
    })
}
