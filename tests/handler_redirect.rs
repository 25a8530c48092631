mod common;

use axum::http::StatusCode;
use serde_json::Value;
use sqlx::PgPool;

#[tokio::test]
async fn test_redirect_counts_each_visit() {
    let server = common::test_server(common::memory_state());
    let created = common::create_link(&server, "https://example.com/page", Some("abc123")).await;
    let id = created["id"].as_i64().unwrap();

    let response = server.get("/abc123").await;
    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://example.com/page");

    let link: Value = server.get(&format!("/api/links/{id}")).await.json();
    assert_eq!(link["usage_count"], 1);

    server.get("/abc123").await.assert_status(StatusCode::FOUND);

    let link: Value = server.get(&format!("/api/links/{id}")).await.json();
    assert_eq!(link["usage_count"], 2);
}

#[tokio::test]
async fn test_redirect_on_any_method() {
    let server = common::test_server(common::memory_state());
    common::create_link(&server, "https://example.com/page", Some("post")).await;

    server.post("/post").await.assert_status(StatusCode::FOUND);
}

#[tokio::test]
async fn test_root_path_is_not_a_code() {
    let server = common::test_server(common::memory_state());

    let response = server.get("/").await;

    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_unknown_paths_fall_through_to_404() {
    let server = common::test_server(common::memory_state());

    server.get("/nope").await.assert_status_not_found();
    server.get("/blog/2026/post").await.assert_status_not_found();
}

#[tokio::test]
async fn test_codes_are_case_sensitive() {
    let server = common::test_server(common::memory_state());
    common::create_link(&server, "https://example.com/page", Some("AbC")).await;

    server.get("/AbC").await.assert_status(StatusCode::FOUND);
    server.get("/abc").await.assert_status_not_found();
}

#[tokio::test]
async fn test_deleted_code_can_be_reused() {
    let server = common::test_server(common::memory_state());
    let created = common::create_link(&server, "https://example.com/old", Some("reuse")).await;
    let id = created["id"].as_i64().unwrap();

    server
        .delete(&format!("/api/links/{id}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server.get("/reuse").await.assert_status_not_found();

    common::create_link(&server, "https://example.com/new", Some("reuse")).await;

    let response = server.get("/reuse").await;
    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://example.com/new");
}

#[sqlx::test]
async fn test_redirect_against_postgres(pool: PgPool) {
    let server = common::test_server(common::pg_state(pool));
    let created = common::create_link(&server, "https://example.com/page", Some("abc123")).await;
    let id = created["id"].as_i64().unwrap();

    for _ in 0..3 {
        let response = server.get("/abc123").await;
        response.assert_status(StatusCode::FOUND);
        assert_eq!(response.header("location"), "https://example.com/page");
    }

    let link: Value = server.get(&format!("/api/links/{id}")).await.json();
    assert_eq!(link["usage_count"], 3);
}
