//! Telegram webhook route.
//!
//! Telegram expects a fast acknowledgement, so the handler validates the
//! envelope, hands the actual lookup to a detached task and returns
//! immediately. The detached task owns the whole pipeline run; if it is
//! ever dropped or aborted, the in-flight upstream calls are dropped with
//! it and no reply is sent.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{debug, error};

use crate::main_lib::AppState;
use crate::telegram::Update;

/// Handle one webhook delivery.
///
/// The path token is the shared secret: a mismatch gets a 404 as if the
/// route did not exist. Non-text updates are acknowledged and ignored.
async fn receive_update(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
    Json(update): Json<Update>,
) -> (StatusCode, &'static str) {
    if token != state.bot_token {
        return (StatusCode::NOT_FOUND, "not found");
    }

    let Some(message) = update.message else {
        debug!("Ignoring non-message update {}", update.update_id);
        return (StatusCode::OK, "ok");
    };
    let Some(text) = message.text else {
        debug!("Ignoring non-text message in update {}", update.update_id);
        return (StatusCode::OK, "ok");
    };

    let chat_id = message.chat.id;

    if let Some(command) = text.trim().strip_prefix('/') {
        if command == "start" || command.starts_with("start ") || command.starts_with("start@") {
            let name = message
                .from
                .and_then(|u| u.first_name)
                .unwrap_or_else(|| "there".to_string());
            let greeting = format!(
                "\u{1f44b} Hi {}! Send a crypto name or symbol and I'll return the USD price.",
                name
            );
            deliver(state, chat_id, async move { greeting });
        }
        // Other commands are not ours; acknowledge and drop them.
        return (StatusCode::OK, "ok");
    }

    let pipeline = state.pipeline.clone();
    deliver(state, chat_id, async move { pipeline.run(&text).await });

    (StatusCode::OK, "ok")
}

/// Produce a reply off the request cycle and deliver it to the chat.
fn deliver<F>(state: Arc<AppState>, chat_id: i64, reply: F)
where
    F: std::future::Future<Output = String> + Send + 'static,
{
    tokio::spawn(async move {
        let text = reply.await;
        if let Err(e) = state.replier.send_reply(chat_id, &text).await {
            error!("Failed to deliver reply to chat {}: {}", chat_id, e);
        }
    });
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/webhook/{token}", post(receive_update))
}
