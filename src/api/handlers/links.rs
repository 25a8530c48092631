//! Handlers for link management endpoints (create, list, get, delete).

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::links::{
    CreateLinkRequest, LinkListResponse, PaginationMeta, ShortLinkResponse,
};
use crate::api::dto::pagination::PaginationParams;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a long URL under a generated or desired short code.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// {
///   "long_url": "https://example.com/page",
///   "short_code": "abc123"   // optional
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request for a malformed URL or code
/// - 409 Conflict for a duplicate long URL, a taken code or a reserved path
/// - 500 when no free code could be generated
/// - 503 when the store is unavailable
pub async fn create_link_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<ShortLinkResponse>), AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create_short_link(
            &payload.long_url,
            payload.short_code.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ShortLinkResponse::from_link(link, &state.base_url)),
    ))
}

/// Lists registered links, newest first.
///
/// # Endpoint
///
/// `GET /api/links`
///
/// # Query Parameters
///
/// - `page` (optional): Page number (default: 1)
/// - `page_size` (optional): Items per page (default: 25, max: 100)
///
/// # Errors
///
/// Returns 400 Bad Request if pagination parameters are invalid.
pub async fn list_links_handler(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<LinkListResponse>, AppError> {
    let (page, page_size) = params
        .validate()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let listing = state.link_service.list_short_links(page, page_size).await?;

    let items = listing
        .items
        .into_iter()
        .map(|link| ShortLinkResponse::from_link(link, &state.base_url))
        .collect();

    Ok(Json(LinkListResponse {
        pagination: PaginationMeta::new(listing.page, listing.page_size, listing.total),
        items,
    }))
}

/// Fetches one link by id.
///
/// # Endpoint
///
/// `GET /api/links/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if no link has this id.
pub async fn get_link_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ShortLinkResponse>, AppError> {
    let link = state.link_service.get_short_link(id).await?;
    Ok(Json(ShortLinkResponse::from_link(link, &state.base_url)))
}

/// Permanently deletes a link; its code becomes available again.
///
/// # Endpoint
///
/// `DELETE /api/links/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if no link has this id.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete_short_link(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
