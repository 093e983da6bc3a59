//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. `TraceLayer` (request tracing)
//! 2. Request ID (add unique ID to each request)
//! 3. No-cache headers (every response, static files included)

pub mod cache_control;
pub mod request_id;

pub use cache_control::no_cache_middleware;
pub use request_id::request_id_middleware;
