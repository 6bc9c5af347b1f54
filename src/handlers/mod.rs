pub mod analyze;
pub mod health;
pub mod pages;

pub use analyze::*;
pub use health::*;
pub use pages::*;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::middleware::logging_middleware;
use crate::state::AppState;

/// Builds the full application router.
pub fn create_router(state: AppState) -> Router {
    // Room for the multipart envelope; the file itself is capped while streaming.
    let body_limit = state.config.max_upload_bytes() * 2;

    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/suggestions.html", get(suggestions_handler))
        .route("/script.js", get(script_handler))
        .route("/style.css", get(style_handler))
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .route(
            "/analyze",
            post(analyze_handler).fallback(invalid_method_handler),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(body_limit))
                .layer(axum::middleware::from_fn(logging_middleware)),
        )
        .with_state(state)
}
