use crate::{
    application::{
        resolve_image_url::use_case::ResolveImageUrlUseCase,
        upload_avatar::use_case::{AvatarPolicy, UploadAvatarUseCase},
    },
    config::Config,
    infrastructure::storage::traits::ObjectStore,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub upload_avatar: Arc<UploadAvatarUseCase>,
    pub image_urls: Arc<ResolveImageUrlUseCase>,
}

impl AppState {
    pub fn new(config: Config, storage: Arc<dyn ObjectStore>) -> Self {
        let upload_avatar = Arc::new(UploadAvatarUseCase::new(
            storage.clone(),
            AvatarPolicy::from(&config),
        ));
        let image_urls = Arc::new(ResolveImageUrlUseCase::new(
            storage,
            config.placeholder_image_path.clone(),
        ));
        Self {
            config,
            upload_avatar,
            image_urls,
        }
    }
}
