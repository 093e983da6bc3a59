//! Cache-busting headers middleware.
//!
//! The site is edited in place while the server runs, so browsers must
//! never reuse a stale copy of a page, script or stylesheet.

use axum::{
    extract::Request,
    http::{
        HeaderValue,
        header::{CACHE_CONTROL, EXPIRES, PRAGMA},
    },
    middleware::Next,
    response::Response,
};

/// Add no-cache headers to all responses.
///
/// Headers applied:
/// - `Cache-Control: no-cache, no-store, must-revalidate`
/// - `Pragma: no-cache` - HTTP/1.0 caches
/// - `Expires: 0` - Proxies that ignore `Cache-Control`
///
/// Existing values set by inner services (e.g. `ServeDir`) are replaced.
pub async fn no_cache_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(
        CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(EXPIRES, HeaderValue::from_static("0"));

    response
}
