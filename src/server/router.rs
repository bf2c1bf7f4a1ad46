//! Application router builder.
//!
//! Shared between the production binary and the integration tests so both
//! run the exact same middleware stack.

use std::time::Duration;

use axum::Router;
use axum::routing::{get, post, put};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::handlers;
use super::state::AppState;

/// Generation can sit on the Gemini call for a while; the request timeout
/// has to outlast it.
const REQUEST_TIMEOUT_SECS: u64 = 90;

/// Build the full application [`Router`] with all middleware layers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/manual", get(handlers::manual))
        .route("/auth/login", post(handlers::login))
        .route("/session/reset", post(handlers::reset))
        .route(
            "/campaign",
            post(handlers::create_campaign).get(handlers::get_campaign),
        )
        .route("/campaign/variants/{index}", put(handlers::edit_variant))
        .route(
            "/campaign/variants/{index}/save",
            post(handlers::save_variant),
        )
        .route("/campaign/export", post(handlers::export_campaign))
        // -- Middleware stack (applied bottom-up) --
        // Panic recovery: catch panics and return 500.
        .layer(CatchPanicLayer::new())
        // Request timeout.
        .layer(TimeoutLayer::new(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
        // Structured request/response tracing.
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Shared state.
        .with_state(state)
}
