//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (data directory present)
//!
//! # Form handlers
//! POST /cgi-bin/register       - Register (returns a notice fragment)
//! POST /cgi-bin/login          - Login (returns a page)
//! GET  /cgi-bin/buy            - Checkout (returns a page)
//! POST /cgi-bin/buy            - Checkout (returns a page)
//!
//! # Static site
//! GET  /*                      - Files under the static directory
//! ```
//!
//! Every response, static or dynamic, carries no-cache headers.

pub mod auth;
pub mod checkout;
mod form;
pub mod health;

pub use form::FormFields;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::{no_cache_middleware, request_id_middleware};
use crate::state::AppState;

/// Path prefix reserved for the form handlers.
pub const CGI_PREFIX: &str = "/cgi-bin";

/// Create the form handler routes router.
pub fn cgi_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/buy", get(checkout::buy).post(checkout::buy))
}

/// Create all dynamic routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest(CGI_PREFIX, cgi_routes())
}

/// Build the complete application: dynamic routes, the static site as
/// fallback, and the middleware stack.
pub fn app(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config().static_dir);

    Router::new()
        .merge(routes())
        .fallback_service(static_files)
        .layer(axum::middleware::from_fn(no_cache_middleware))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}
