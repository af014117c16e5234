use crate::{
    application::resolve_image_url::dto::{
        ImageUrlQuery, ImageUrlResponse, ImageUrlsRequest, ImageUrlsResponse,
    },
    domain::media::bucket::Bucket,
    presentation::http::{errors::AppError, state::AppState},
};
use axum::{
    Json,
    extract::{Path, Query, State},
};

fn parse_bucket(raw: &str) -> Result<Bucket, AppError> {
    raw.parse::<Bucket>().map_err(AppError::NotFound)
}

/// Resolves one stored path. Always 200 for a known bucket; store failures
/// fall back to the placeholder.
pub async fn image_url(
    State(state): State<AppState>,
    Path(bucket): Path<String>,
    Query(query): Query<ImageUrlQuery>,
) -> Result<Json<ImageUrlResponse>, AppError> {
    let bucket = parse_bucket(&bucket)?;
    let url = state.image_urls.execute(bucket, query.path.as_deref());
    Ok(Json(ImageUrlResponse { url }))
}

/// Resolves a batch of stored paths, e.g. a course gallery, in input order.
pub async fn image_urls(
    State(state): State<AppState>,
    Path(bucket): Path<String>,
    Json(request): Json<ImageUrlsRequest>,
) -> Result<Json<ImageUrlsResponse>, AppError> {
    let bucket = parse_bucket(&bucket)?;
    let urls = request
        .paths
        .iter()
        .map(|path| state.image_urls.execute(bucket, path.as_deref()))
        .collect();
    Ok(Json(ImageUrlsResponse { urls }))
}
