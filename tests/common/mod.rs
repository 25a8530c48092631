#![allow(dead_code)]

use axum_test::TestServer;
use serde_json::{Value, json};
use sqlx::PgPool;
use std::sync::Arc;
use shortlink_registry::domain::repositories::{PathRegistry, ShortLinkRepository};
use shortlink_registry::infrastructure::cache::NullCache;
use shortlink_registry::infrastructure::persistence::{
    MemoryShortLinkRepository, PgShortLinkRepository,
};
use shortlink_registry::infrastructure::routing::StaticPathRegistry;
use shortlink_registry::routes::{RESERVED_SEGMENTS, app_router};
use shortlink_registry::state::AppState;

pub const BASE_URL: &str = "https://s.example.com";

/// Paths the host site owns in tests, on top of the router's own segments.
pub const HOST_PATHS: &[&str] = &["about", "contact"];

pub fn test_paths() -> Arc<dyn PathRegistry> {
    Arc::new(StaticPathRegistry::new(
        RESERVED_SEGMENTS.iter().chain(HOST_PATHS.iter()),
    ))
}

pub fn create_test_state(repository: Arc<dyn ShortLinkRepository>) -> AppState {
    AppState::new(repository, test_paths(), Arc::new(NullCache::new()), BASE_URL)
}

pub fn memory_state() -> AppState {
    create_test_state(Arc::new(MemoryShortLinkRepository::new()))
}

pub fn pg_state(pool: PgPool) -> AppState {
    create_test_state(Arc::new(PgShortLinkRepository::new(Arc::new(pool))))
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(app_router(state)).unwrap()
}

/// Registers a link through the API and returns the response body.
pub async fn create_link(server: &TestServer, long_url: &str, short_code: Option<&str>) -> Value {
    let mut body = json!({ "long_url": long_url });
    if let Some(code) = short_code {
        body["short_code"] = json!(code);
    }

    let response = server.post("/api/links").json(&body).await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}
