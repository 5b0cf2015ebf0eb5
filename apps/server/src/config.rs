//! Process configuration, read from the environment once at startup and
//! immutable afterwards. No other part of the code touches `std::env`.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use coinquote_market_data::DEFAULT_REQUEST_TIMEOUT;

/// Runtime configuration for the server process.
#[derive(Clone, Debug)]
pub struct Config {
    /// Telegram bot token; doubles as the webhook path secret.
    pub bot_token: String,

    /// Address the HTTP server binds to.
    pub listen_addr: SocketAddr,

    /// Externally reachable base URL (e.g. the hosting platform's URL).
    /// When present, the Telegram webhook is registered at startup and
    /// removed at shutdown. When absent, webhook registration is skipped
    /// and updates are only served to whoever posts them.
    pub public_url: Option<String>,

    /// Telegram Bot API base URL. Overridable for integration tests.
    pub telegram_api_url: String,

    /// Override for the CoinGecko base URL (search + primary prices).
    pub coingecko_url: Option<String>,

    /// Override for the CryptoCompare base URL (secondary prices).
    pub cryptocompare_url: Option<String>,

    /// Per-request timeout applied to every outbound HTTP call: asset
    /// search, both price providers and the Telegram Bot API.
    pub request_timeout: Duration,
}

const DEFAULT_PORT: u16 = 8443;
const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

fn non_empty(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .filter(|v| !v.is_empty())
}

fn request_timeout(raw: Option<&str>) -> anyhow::Result<Duration> {
    match raw {
        Some(raw) => {
            let secs = raw
                .trim()
                .parse::<u64>()
                .context("REQUEST_TIMEOUT_SECS is not a whole number of seconds")?;
            Ok(Duration::from_secs(secs))
        }
        None => Ok(DEFAULT_REQUEST_TIMEOUT),
    }
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// `BOT_TOKEN` is required; everything else has a default.
    pub fn from_env() -> anyhow::Result<Self> {
        let bot_token = std::env::var("BOT_TOKEN")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .context("BOT_TOKEN not set")?;

        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().context("PORT is not a valid port number")?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            bot_token,
            listen_addr: SocketAddr::from(([0, 0, 0, 0], port)),
            public_url: non_empty("PUBLIC_URL"),
            telegram_api_url: non_empty("TELEGRAM_API_URL")
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
            coingecko_url: non_empty("COINGECKO_URL"),
            cryptocompare_url: non_empty("CRYPTOCOMPARE_URL"),
            request_timeout: request_timeout(
                std::env::var("REQUEST_TIMEOUT_SECS").ok().as_deref(),
            )?,
        })
    }
}
