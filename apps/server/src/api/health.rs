use std::sync::Arc;

use axum::{routing::get, Router};

use crate::main_lib::AppState;

/// Liveness probe for uptime monitors. Fixed status and body; no
/// interaction with the pipeline.
async fn liveness() -> &'static str {
    "\u{2705} Bot is running fine!"
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(liveness))
}
