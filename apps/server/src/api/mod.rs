use std::sync::Arc;

use axum::Router;

use crate::main_lib::AppState;

pub mod health;
pub mod webhook;

/// Compose the full application router.
pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health::router())
        .merge(webhook::router())
        .with_state(state)
}
