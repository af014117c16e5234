use super::{
    handlers::{avatar, health, images},
    middleware::{logging::logging_middleware, request_id::request_id_middleware},
    state::AppState,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.request_body_limit();

    let avatar_routes = Router::new()
        .route("/api/v1/users/{user_id}/avatar", post(avatar::upload_avatar))
        .layer(DefaultBodyLimit::max(body_limit));

    let image_routes = Router::new()
        .route("/api/v1/images/{bucket}/url", get(images::image_url))
        .route("/api/v1/images/{bucket}/urls", post(images::image_urls));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(avatar_routes)
        .merge(image_routes)
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
