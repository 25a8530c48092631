//! API route configuration.

use crate::api::handlers::{
    create_link_handler, delete_link_handler, get_link_handler, list_links_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Link administration routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `POST   /links`        - Register a long URL
/// - `GET    /links`        - List links (paginated)
/// - `GET    /links/{id}`   - Fetch one link
/// - `DELETE /links/{id}`   - Delete a link
pub fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route(
            "/links/{id}",
            get(get_link_handler).delete(delete_link_handler),
        )
}
