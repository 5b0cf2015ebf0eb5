//! Webhook server for the coinquote Telegram bot.
//!
//! The transport adapter lives here: parsing the Telegram update
//! envelope, verifying the webhook token, delivering replies back to the
//! originating chat, and the liveness route for uptime monitors. All
//! price logic lives in the `coinquote-market-data` crate.

pub mod api;
pub mod config;
pub mod main_lib;
pub mod telegram;

pub use config::Config;
pub use main_lib::{build_state, init_tracing, AppState};
