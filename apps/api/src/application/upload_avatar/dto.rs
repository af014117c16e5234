use crate::domain::media::entity::AvatarFile;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone)]
pub struct UploadAvatarRequest {
    pub user_id: String,
    pub file: AvatarFile,
}

#[derive(Debug, Clone, Deserialize, Serialize, TS)]
#[ts(export)]
pub struct UploadAvatarResponse {
    pub url: String,
}
