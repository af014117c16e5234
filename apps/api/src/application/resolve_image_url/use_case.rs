use crate::{
    domain::media::{bucket::Bucket, errors::MediaError, value_objects::ImageReference},
    infrastructure::storage::traits::ObjectStore,
};
use std::sync::Arc;
use tracing::{instrument, warn};

/// Maps a stored image path to a displayable URL.
///
/// Holds no mutable state: the result depends only on the inputs and on
/// what the store answers, so one instance can be shared across requests.
pub struct ResolveImageUrlUseCase {
    storage: Arc<dyn ObjectStore>,
    placeholder: String,
}

impl ResolveImageUrlUseCase {
    pub fn new(storage: Arc<dyn ObjectStore>, placeholder: impl Into<String>) -> Self {
        Self {
            storage,
            placeholder: placeholder.into(),
        }
    }

    /// Resolves `path`, falling back to the placeholder on any store failure.
    ///
    /// Never fails; the worst outcome is the placeholder image.
    #[instrument(skip(self))]
    pub fn execute(&self, bucket: Bucket, path: Option<&str>) -> String {
        match self.try_execute(bucket, path) {
            Ok(url) => url,
            Err(e) => {
                warn!(error = %e, "Falling back to placeholder image");
                self.placeholder.clone()
            }
        }
    }

    /// Strict form of [`execute`](Self::execute): store failures are
    /// returned as [`MediaError::Resolve`].
    pub fn try_execute(&self, bucket: Bucket, path: Option<&str>) -> Result<String, MediaError> {
        let reference = ImageReference::parse(path);
        if let Some(name) = reference.object_name() {
            return public_url_for(self.storage.as_ref(), bucket, name);
        }
        match reference {
            ImageReference::Absolute(url) | ImageReference::RootRelative(url) => {
                Ok(url.to_string())
            }
            _ => Ok(self.placeholder.clone()),
        }
    }
}

/// Asks the store for the public URL of `key`, treating a missing or empty
/// URL as a failure.
pub(crate) fn public_url_for(
    storage: &dyn ObjectStore,
    bucket: Bucket,
    key: &str,
) -> Result<String, MediaError> {
    match storage.public_url(bucket.as_str(), key) {
        Ok(Some(url)) if !url.is_empty() => Ok(url),
        Ok(_) => Err(MediaError::Resolve(format!(
            "store returned no public url for {}/{}",
            bucket, key
        ))),
        Err(e) => Err(MediaError::Resolve(e.to_string())),
    }
}
