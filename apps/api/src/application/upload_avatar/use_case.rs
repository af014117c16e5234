use crate::{
    application::{
        resolve_image_url::use_case::public_url_for, upload_avatar::dto::UploadAvatarRequest,
    },
    config::{Config, DEFAULT_AVATAR_CACHE_CONTROL, DEFAULT_AVATAR_MAX_BYTES},
    domain::media::{
        bucket::Bucket,
        entity::AvatarFile,
        errors::{ByteLimit, MediaError, ValidationError},
        value_objects::AvatarKey,
    },
    infrastructure::storage::traits::{ObjectStore, UploadOptions},
};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Limits and storage hints applied to every avatar upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarPolicy {
    pub max_bytes: usize,
    pub cache_control: String,
}

impl Default for AvatarPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_AVATAR_MAX_BYTES,
            cache_control: DEFAULT_AVATAR_CACHE_CONTROL.to_string(),
        }
    }
}

impl From<&Config> for AvatarPolicy {
    fn from(config: &Config) -> Self {
        Self {
            max_bytes: config.avatar_max_bytes,
            cache_control: config.avatar_cache_control.clone(),
        }
    }
}

/// Replaces a user's avatar and returns its public URL.
///
/// Steps run in order: validate, delete the user's previous avatar under
/// every allowed extension (best-effort), upload with overwrite, resolve the
/// public URL. Validation failures happen
/// before any store call. Nothing is retried.
///
/// Two concurrent uploads for the same user race on the same key and the
/// last committed write wins; there is no locking or versioning.
pub struct UploadAvatarUseCase {
    storage: Arc<dyn ObjectStore>,
    policy: AvatarPolicy,
}

impl UploadAvatarUseCase {
    pub fn new(storage: Arc<dyn ObjectStore>, policy: AvatarPolicy) -> Self {
        info!(
            max_bytes = policy.max_bytes,
            cache_control = %policy.cache_control,
            "Initializing UploadAvatarUseCase"
        );
        Self { storage, policy }
    }

    #[instrument(skip(self, request), fields(
        user_id = %request.user_id,
        file_name = %request.file.name,
        content_type = %request.file.content_type,
        size = request.file.size()
    ))]
    pub async fn execute(&self, request: UploadAvatarRequest) -> Result<String, MediaError> {
        let avatar_key = self
            .validate(&request.user_id, &request.file)
            .inspect_err(|e| debug!(error = %e, "Avatar rejected"))?;
        let key = avatar_key.to_string();
        let bucket = Bucket::Avatars;

        // Advisory cleanup; missing objects are the common case.
        let previous = avatar_key.all_variants();
        if let Err(e) = self.storage.remove(bucket.as_str(), &previous).await {
            warn!(key = %key, error = %e, "Ignoring failure to remove previous avatar");
        }

        let options = UploadOptions {
            cache_control: self.policy.cache_control.clone(),
            content_type: request.file.content_type,
            upsert: true,
        };
        let uploaded = self
            .storage
            .upload(bucket.as_str(), &key, request.file.data, options)
            .await
            .map_err(|e| {
                error!(key = %key, error = %e, "Avatar upload failed");
                MediaError::Upload(e.to_string())
            })?;
        debug!(path = %uploaded.path, "Avatar stored");

        public_url_for(self.storage.as_ref(), bucket, &key).inspect_err(|e| {
            error!(key = %key, error = %e, "Avatar stored but public url unavailable");
        })
    }

    /// Checks type, then size, then derives the storage key.
    fn validate(&self, user_id: &str, file: &AvatarFile) -> Result<AvatarKey, ValidationError> {
        if !file.is_image() {
            return Err(ValidationError::NotAnImage {
                content_type: file.content_type.clone(),
            });
        }
        if file.truncated || file.size() > self.policy.max_bytes {
            return Err(ValidationError::TooLarge {
                size: file.size(),
                limit: ByteLimit(self.policy.max_bytes),
            });
        }
        AvatarKey::derive(user_id, &file.name)
    }
}
