//! Route definitions and router construction.

use std::any::Any;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::Response;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::error::HttpError;
use crate::handlers;
use crate::state::AppState;

/// Build the gateway routes without state applied.
pub(crate) fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/generate",
            post(handlers::generate::generate).layer(DefaultBodyLimit::disable()),
        )
        .route("/api/health", get(handlers::health::health))
        .fallback(handlers::health::not_found)
        .method_not_allowed_fallback(handlers::health::method_not_allowed)
}

/// Create the main application router.
///
/// Requests are traced, and a panic anywhere in a handler becomes a 500
/// failure envelope instead of a dropped connection.
pub fn create_router(state: AppState) -> Router {
    api_routes()
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<axum::body::Body> {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "Internal server error".to_string()
    };

    error!("Request handler panicked: {message}");
    HttpError::Internal(message).into_response()
}
