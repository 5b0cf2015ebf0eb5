use std::sync::Arc;

use coinquote_server::api::app_router;
use coinquote_server::config::Config;
use coinquote_server::main_lib::{build_state, init_tracing};
use coinquote_server::telegram::TelegramClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    init_tracing();

    let telegram = TelegramClient::new(
        &config.bot_token,
        &config.telegram_api_url,
        config.request_timeout,
    );
    let state = build_state(&config, Arc::new(telegram.clone()));

    // Register the webhook when we know our external URL; keep serving
    // either way, as a registration hiccup is recoverable by restart.
    if let Some(public_url) = &config.public_url {
        let webhook_url = format!("{}/webhook/{}", public_url, config.bot_token);
        match telegram.set_webhook(&webhook_url).await {
            Ok(()) => tracing::info!("Telegram webhook registered"),
            Err(e) => tracing::error!("Failed to register Telegram webhook: {}", e),
        }
    }

    let router = app_router(state);
    tracing::info!("Listening on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if config.public_url.is_some() {
        if let Err(e) = telegram.delete_webhook().await {
            tracing::error!("Failed to remove Telegram webhook: {}", e);
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
