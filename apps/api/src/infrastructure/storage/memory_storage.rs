use super::{
    public_url::build_public_url,
    traits::{ObjectStore, StoreError, UploadOptions, UploadedObject},
};
use async_trait::async_trait;
use bytes::Bytes;
use std::{
    collections::{BTreeMap, HashMap},
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub data: Bytes,
    pub content_type: String,
    pub cache_control: String,
}

/// A call received by [`InMemoryObjectStore`], in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOperation {
    Remove { bucket: String, keys: Vec<String> },
    Upload { bucket: String, key: String },
    PublicUrl { bucket: String, key: String },
}

#[derive(Debug, Default)]
struct Failures {
    remove: Option<StoreError>,
    upload: Option<StoreError>,
    public_url: Option<StoreError>,
}

/// Process-local object store for local development and tests.
///
/// Failures can be injected per operation; an injected failure applies to
/// every later call until cleared with `None`.
///
/// Calls are only recorded after [`with_operation_log`](Self::with_operation_log),
/// so a long-running `memory` backend does not grow without bound.
pub struct InMemoryObjectStore {
    public_base: String,
    buckets: RwLock<HashMap<String, BTreeMap<String, StoredObject>>>,
    log_operations: bool,
    operations: RwLock<Vec<StoreOperation>>,
    failures: RwLock<Failures>,
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

impl InMemoryObjectStore {
    pub fn new(public_base: impl Into<String>) -> Self {
        Self {
            public_base: public_base.into(),
            buckets: RwLock::new(HashMap::new()),
            log_operations: false,
            operations: RwLock::new(Vec::new()),
            failures: RwLock::new(Failures::default()),
        }
    }

    pub fn with_operation_log(mut self) -> Self {
        self.log_operations = true;
        self
    }

    pub fn set_remove_failure(&self, failure: Option<StoreError>) {
        write(&self.failures).remove = failure;
    }

    pub fn set_upload_failure(&self, failure: Option<StoreError>) {
        write(&self.failures).upload = failure;
    }

    pub fn set_public_url_failure(&self, failure: Option<StoreError>) {
        write(&self.failures).public_url = failure;
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        read(&self.buckets)
            .get(bucket)
            .and_then(|objects| objects.get(key))
            .cloned()
    }

    /// Keys currently stored in `bucket`, sorted.
    pub fn keys(&self, bucket: &str) -> Vec<String> {
        read(&self.buckets)
            .get(bucket)
            .map(|objects| objects.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn operations(&self) -> Vec<StoreOperation> {
        read(&self.operations).clone()
    }

    fn record(&self, operation: StoreOperation) {
        if self.log_operations {
            write(&self.operations).push(operation);
        }
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn remove(&self, bucket: &str, keys: &[String]) -> Result<(), StoreError> {
        self.record(StoreOperation::Remove {
            bucket: bucket.to_string(),
            keys: keys.to_vec(),
        });
        if let Some(err) = read(&self.failures).remove.clone() {
            return Err(err);
        }

        // Missing keys are ignored, matching S3 DeleteObject.
        if let Some(objects) = write(&self.buckets).get_mut(bucket) {
            for key in keys {
                objects.remove(key);
            }
        }
        Ok(())
    }

    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        options: UploadOptions,
    ) -> Result<UploadedObject, StoreError> {
        self.record(StoreOperation::Upload {
            bucket: bucket.to_string(),
            key: key.to_string(),
        });
        if let Some(err) = read(&self.failures).upload.clone() {
            return Err(err);
        }

        let mut buckets = write(&self.buckets);
        let objects = buckets.entry(bucket.to_string()).or_default();
        if !options.upsert && objects.contains_key(key) {
            return Err(StoreError::Conflict(key.to_string()));
        }
        objects.insert(
            key.to_string(),
            StoredObject {
                data,
                content_type: options.content_type,
                cache_control: options.cache_control,
            },
        );
        Ok(UploadedObject {
            path: key.to_string(),
        })
    }

    fn public_url(&self, bucket: &str, key: &str) -> Result<Option<String>, StoreError> {
        self.record(StoreOperation::PublicUrl {
            bucket: bucket.to_string(),
            key: key.to_string(),
        });
        if let Some(err) = read(&self.failures).public_url.clone() {
            return Err(err);
        }
        if key.is_empty() {
            return Ok(None);
        }
        Ok(Some(build_public_url(&self.public_base, bucket, key)))
    }
}
