use super::helpers::{PLACEHOLDER, TEST_PUBLIC_URL, expect_status, read_json, send, spawn_app};
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use media_api::infrastructure::storage::{memory_storage::StoreOperation, traits::StoreError};
use serde_json::{Value, json};

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("failed to build request")
}

async fn resolved_url(app: &axum::Router, uri: &str) -> String {
    let res = expect_status(send(app, get(uri)).await, StatusCode::OK).await;
    let body: Value = read_json(res).await;
    body["url"].as_str().expect("url missing").to_string()
}

#[tokio::test]
async fn legacy_prefixed_path_resolves_to_object_url() {
    let app = spawn_app();

    let url = resolved_url(&app.app, "/api/v1/images/course-images/url?path=public/intro.png").await;

    assert_eq!(url, format!("{}/course-images/intro.png", TEST_PUBLIC_URL));
    assert_eq!(
        app.store.operations(),
        vec![StoreOperation::PublicUrl {
            bucket: "course-images".to_string(),
            key: "intro.png".to_string(),
        }]
    );
}

#[tokio::test]
async fn missing_path_resolves_to_placeholder() {
    let app = spawn_app();

    assert_eq!(
        resolved_url(&app.app, "/api/v1/images/course-images/url").await,
        PLACEHOLDER
    );
    assert_eq!(
        resolved_url(&app.app, "/api/v1/images/avatars/url?path=").await,
        PLACEHOLDER
    );
    assert!(app.store.operations().is_empty());
}

#[tokio::test]
async fn absolute_url_passes_through() {
    let app = spawn_app();

    let url = resolved_url(
        &app.app,
        "/api/v1/images/course-images/url?path=https%3A%2F%2Fimages.example.com%2Fcourse.jpg",
    )
    .await;

    assert_eq!(url, "https://images.example.com/course.jpg");
    assert!(app.store.operations().is_empty());
}

#[tokio::test]
async fn store_failure_falls_back_to_placeholder() {
    let app = spawn_app();
    app.store
        .set_public_url_failure(Some(StoreError::Backend("bucket offline".to_string())));

    assert_eq!(
        resolved_url(&app.app, "/api/v1/images/course-images/url?path=intro.png").await,
        PLACEHOLDER
    );
}

#[tokio::test]
async fn unknown_bucket_is_not_found() {
    let app = spawn_app();

    let res = send(&app.app, get("/api/v1/images/secrets/url?path=a.png")).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn batch_resolution_keeps_input_order() {
    let app = spawn_app();

    let req = Request::builder()
        .method("POST")
        .uri("/api/v1/images/course-images/urls")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "paths": ["public/a.png", null, "/static/b.png", "c.png"]
            })
            .to_string(),
        ))
        .expect("failed to build request");

    let res = expect_status(send(&app.app, req).await, StatusCode::OK).await;
    let body: Value = read_json(res).await;

    assert_eq!(
        body["urls"],
        json!([
            format!("{}/course-images/a.png", TEST_PUBLIC_URL),
            PLACEHOLDER,
            "/static/b.png",
            format!("{}/course-images/c.png", TEST_PUBLIC_URL),
        ])
    );
}

#[tokio::test]
async fn responses_carry_request_id() {
    let app = spawn_app();

    let res = send(&app.app, get("/health")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));
}
