//! Web server module for receiving slash commands.
//!
//! This module provides a thin web server that:
//! - Receives the slash command form post on any path
//! - Checks the shared token and parses the text
//! - Forwards the message to the incoming webhook
//! - Replies 200 with a plain-text result

pub mod handlers;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub use handlers::{health, slash_command, AppState, HealthResponse};

/// Build the application router.
///
/// `/health` is the only named route; everything else is a slash command.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .fallback(slash_command)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
