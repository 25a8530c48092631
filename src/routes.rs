//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`      - Health check: store and cache (public)
//! - `/api/links*`       - Link administration
//! - anything else       - Offered to the redirect resolver; 302 on a hit
//!
//! Trailing slash normalization is applied around the whole router in
//! [`crate::server::run`].

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;

/// First path segments served by this router. Short codes may not shadow them.
pub const RESERVED_SEGMENTS: &[&str] = &["api", "health"];

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api::routes::link_routes())
        .fallback(redirect_handler)
        .with_state(state)
        .layer(tracing::layer())
}
