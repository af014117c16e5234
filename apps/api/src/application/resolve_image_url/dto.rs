use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageUrlQuery {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, TS)]
#[ts(export)]
pub struct ImageUrlsRequest {
    pub paths: Vec<Option<String>>,
}

#[derive(Debug, Clone, Deserialize, Serialize, TS)]
#[ts(export)]
pub struct ImageUrlResponse {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, TS)]
#[ts(export)]
pub struct ImageUrlsResponse {
    /// Same order as the request's `paths`.
    pub urls: Vec<String>,
}
