//! Fallback handler resolving short codes.

use axum::{
    extract::State,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// Any path not matched by another route, e.g. `GET /{code}`.
///
/// # Request Flow
///
/// 1. Hand the request path to the redirect resolver
/// 2. On a hit, the usage counter has already been incremented
/// 3. Return 302 Found with `Location` set to the long URL
///
/// # Errors
///
/// Returns 404 Not Found when the path is not a known code, and
/// 503 Service Unavailable if the store cannot be reached.
pub async fn redirect_handler(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Response, AppError> {
    match state.resolver.resolve(uri.path()).await? {
        Some(target) => {
            Ok((StatusCode::FOUND, [(header::LOCATION, target.long_url)]).into_response())
        }
        None => Err(AppError::not_found(
            "Page not found",
            json!({ "path": uri.path() }),
        )),
    }
}
