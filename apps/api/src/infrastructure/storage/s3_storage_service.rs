use super::{
    public_url::build_public_url,
    traits::{ObjectStore, StoreError, UploadOptions, UploadedObject},
};
use crate::config::S3Config;
use async_trait::async_trait;
use aws_sdk_s3::{
    Client,
    config::{BehaviorVersion, Credentials, Region, http::HttpResponse},
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    primitives::ByteStream,
};
use bytes::Bytes;
use tracing::{debug, instrument, warn};

const GENERIC_BACKEND_MESSAGE: &str = "object store request failed";

/// Object store backed by any S3-compatible endpoint (R2, MinIO, the
/// Supabase S3 gateway).
pub struct S3ObjectStore {
    client: Client,
    public_url: String,
}

impl S3ObjectStore {
    pub fn new(config: &S3Config, public_url: String) -> Self {
        let creds = Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None,
            None,
            "media-api",
        );
        let sdk_config = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .credentials_provider(creds)
            .endpoint_url(config.endpoint.clone())
            .region(Region::new(config.region.clone()))
            .force_path_style(config.force_path_style)
            .build();
        Self {
            client: Client::from_conf(sdk_config),
            public_url,
        }
    }
}

/// Maps an SDK failure to a [`StoreError`].
///
/// Only the service's own error message reaches `Backend`; transport and
/// request-construction details (endpoint, credentials source) are logged.
fn store_error<E>(key: &str, err: SdkError<E, HttpResponse>) -> StoreError
where
    E: std::error::Error + ProvideErrorMetadata + Send + Sync + 'static,
{
    match err.raw_response().map(|res| res.status().as_u16()) {
        Some(404) => StoreError::NotFound(key.to_string()),
        Some(409) | Some(412) => StoreError::Conflict(key.to_string()),
        _ => {
            warn!(key = %key, error = %DisplayErrorContext(&err), "Object store request failed");
            let message = err
                .as_service_error()
                .and_then(|e| e.message())
                .filter(|m| !m.is_empty())
                .unwrap_or(GENERIC_BACKEND_MESSAGE);
            StoreError::Backend(message.to_string())
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    #[instrument(skip(self))]
    async fn remove(&self, bucket: &str, keys: &[String]) -> Result<(), StoreError> {
        // Every key is attempted; the first failure is reported.
        let mut first_error = None;
        for key in keys {
            match self.client.delete_object().bucket(bucket).key(key).send().await {
                Ok(_) => debug!("Deleted {}/{}", bucket, key),
                Err(e) => {
                    first_error.get_or_insert(store_error(key, e));
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    #[instrument(skip(self, data, options), fields(size = data.len(), upsert = options.upsert))]
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        options: UploadOptions,
    ) -> Result<UploadedObject, StoreError> {
        let mut request = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(data))
            .content_type(options.content_type)
            .cache_control(options.cache_control);
        if !options.upsert {
            request = request.if_none_match("*");
        }
        request.send().await.map_err(|e| store_error(key, e))?;
        Ok(UploadedObject {
            path: key.to_string(),
        })
    }

    fn public_url(&self, bucket: &str, key: &str) -> Result<Option<String>, StoreError> {
        if key.is_empty() {
            return Ok(None);
        }
        Ok(Some(build_public_url(&self.public_url, bucket, key)))
    }
}
