use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use media_api::{
    config::Config,
    infrastructure::storage::memory_storage::InMemoryObjectStore,
    presentation::http::{routes::create_router, state::AppState},
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_PUBLIC_URL: &str = "https://storage.test/storage/v1/object/public";
pub const PLACEHOLDER: &str = "/placeholder.svg";

pub struct TestApp {
    pub app: Router,
    pub store: Arc<InMemoryObjectStore>,
}

pub fn spawn_app() -> TestApp {
    let store = Arc::new(InMemoryObjectStore::new(TEST_PUBLIC_URL).with_operation_log());
    let config = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        storage_public_url: TEST_PUBLIC_URL.to_string(),
        placeholder_image_path: PLACEHOLDER.to_string(),
        ..Config::default()
    };
    let state = AppState::new(config, store.clone());

    TestApp {
        app: create_router(state),
        store,
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> axum::response::Response {
    app.clone().oneshot(req).await.expect("request failed")
}

pub async fn read_json<T: DeserializeOwned>(res: axum::response::Response) -> T {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("failed to parse json")
}

pub async fn read_text(res: axum::response::Response) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    String::from_utf8(bytes.to_vec()).expect("invalid utf8")
}

pub async fn expect_status(
    res: axum::response::Response,
    expected: StatusCode,
) -> axum::response::Response {
    let actual = res.status();

    if actual == expected {
        return res;
    }

    let body = read_text(res).await;
    panic!(
        "HTTP status mismatch. Expected {}, got {}. Response body: {}",
        expected, actual, body
    );
}

pub fn multipart_file_body(
    field_name: &str,
    file_name: &str,
    content_type: &str,
    data: &[u8],
) -> (String, Vec<u8>) {
    let boundary = format!("----media-boundary-{}", Uuid::now_v7());
    let mut body = Vec::new();

    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field_name, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());

    (boundary, body)
}

pub fn avatar_upload_request(
    user_id: &str,
    file_name: &str,
    content_type: &str,
    data: &[u8],
) -> Request<Body> {
    let (boundary, body) = multipart_file_body("file", file_name, content_type, data);
    Request::builder()
        .method("POST")
        .uri(format!("/api/v1/users/{}/avatar", user_id))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .expect("failed to build upload request")
}
