//! Application configuration loading from environment variables.
//!
//! All configuration is read from the environment at startup (after `.env` is
//! loaded by `dotenvy`), so the service runs the same way locally and in
//! containers.
//!
//! # Environment Variables
//!
//! ## Required when `STORAGE_BACKEND=s3`
//! - `S3_ACCESS_KEY_ID`: access key for the S3-compatible store
//! - `S3_SECRET_ACCESS_KEY`: secret key for the S3-compatible store
//! - `S3_ENDPOINT`: API endpoint (e.g. `https://<project>.supabase.co/storage/v1/s3`)
//!
//! ## Optional Variables
//! - `RUST_LOG`: Logging level (default: "info,media_api=debug,tower_http=debug")
//! - `HOST`: Server bind address (default: "0.0.0.0")
//! - `PORT`: Server port (default: 3000)
//! - `STORAGE_BACKEND`: `s3` or `memory` (default: `s3`)
//! - `S3_REGION`: region (default: "auto")
//! - `S3_FORCE_PATH_STYLE`: Use path-style URLs (default: true)
//! - `STORAGE_PUBLIC_URL`: base for public object URLs, may contain `{bucket}`/`{key}`
//! - `PLACEHOLDER_IMAGE_PATH`: fallback image path (default: "/placeholder.svg")
//! - `AVATAR_MAX_BYTES`: avatar size limit (default: 5242880)
//! - `AVATAR_CACHE_CONTROL`: cache hint stored with avatars (default: "max-age=3600")

use serde::Deserialize;
use std::{fmt, str::FromStr};

pub const DEFAULT_PLACEHOLDER_IMAGE_PATH: &str = "/placeholder.svg";
pub const DEFAULT_AVATAR_MAX_BYTES: usize = 5 * 1024 * 1024;
pub const DEFAULT_AVATAR_CACHE_CONTROL: &str = "max-age=3600";
pub const DEFAULT_STORAGE_PUBLIC_URL: &str = "http://localhost:3000/storage";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    S3,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s3" => Ok(Self::S3),
            "memory" => Ok(Self::Memory),
            other => Err(format!("expected `s3` or `memory`, got `{}`", other)),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::S3 => f.write_str("s3"),
            Self::Memory => f.write_str("memory"),
        }
    }
}

/// Connection settings for an S3-compatible object store.
#[derive(Clone, Deserialize)]
pub struct S3Config {
    pub access_key_id: String,
    pub secret_access_key: String,
    /// API endpoint (e.g. `https://xxx.r2.cloudflarestorage.com`)
    pub endpoint: String,
    /// Typically "auto" or "us-east-1"
    pub region: String,
    /// Use path-style URLs instead of virtual-hosted-style
    pub force_path_style: bool,
}

impl fmt::Debug for S3Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3Config")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("region", &self.region)
            .field("force_path_style", &self.force_path_style)
            .finish()
    }
}

/// Complete server configuration loaded from environment.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server bind address
    pub host: String,

    /// Server port
    pub port: u16,

    pub storage_backend: StorageBackend,

    /// Present when `storage_backend` is `S3`
    pub s3: Option<S3Config>,

    /// Base for public object URLs (e.g. `https://<project>.supabase.co/storage/v1/object/public`)
    pub storage_public_url: String,

    /// Returned by the resolver whenever no real URL can be produced
    pub placeholder_image_path: String,

    pub avatar_max_bytes: usize,

    pub avatar_cache_control: String,
}

impl Default for Config {
    /// In-memory storage with every optional value at its default.
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            storage_backend: StorageBackend::Memory,
            s3: None,
            storage_public_url: DEFAULT_STORAGE_PUBLIC_URL.to_string(),
            placeholder_image_path: DEFAULT_PLACEHOLDER_IMAGE_PATH.to_string(),
            avatar_max_bytes: DEFAULT_AVATAR_MAX_BYTES,
            avatar_cache_control: DEFAULT_AVATAR_CACHE_CONTROL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a set variable
    /// cannot be parsed to the expected type.
    pub fn from_env() -> anyhow::Result<Self> {
        let storage_backend = env_or("STORAGE_BACKEND", StorageBackend::S3)?;
        let s3 = match storage_backend {
            StorageBackend::S3 => Some(S3Config {
                access_key_id: env_required("S3_ACCESS_KEY_ID")?,
                secret_access_key: env_required("S3_SECRET_ACCESS_KEY")?,
                endpoint: env_required("S3_ENDPOINT")?,
                region: env_or("S3_REGION", "auto".to_string())?,
                force_path_style: env_or("S3_FORCE_PATH_STYLE", true)?,
            }),
            StorageBackend::Memory => None,
        };

        let config = Self {
            host: env_or("HOST", "0.0.0.0".to_string())?,
            port: env_or("PORT", 3000)?,
            storage_backend,
            s3,
            storage_public_url: env_or(
                "STORAGE_PUBLIC_URL",
                DEFAULT_STORAGE_PUBLIC_URL.to_string(),
            )?,
            placeholder_image_path: env_or(
                "PLACEHOLDER_IMAGE_PATH",
                DEFAULT_PLACEHOLDER_IMAGE_PATH.to_string(),
            )?,
            avatar_max_bytes: env_or("AVATAR_MAX_BYTES", DEFAULT_AVATAR_MAX_BYTES)?,
            avatar_cache_control: env_or(
                "AVATAR_CACHE_CONTROL",
                DEFAULT_AVATAR_CACHE_CONTROL.to_string(),
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Request bodies may exceed the avatar limit so that oversize files
    /// reach the upload pipeline's own size check.
    pub fn request_body_limit(&self) -> usize {
        self.avatar_max_bytes.saturating_mul(2).max(1024 * 1024)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.avatar_max_bytes == 0 {
            anyhow::bail!("AVATAR_MAX_BYTES must be greater than zero");
        }
        if self.storage_public_url.trim().is_empty() {
            anyhow::bail!("STORAGE_PUBLIC_URL must not be empty");
        }
        Ok(())
    }
}

/// Load a required environment variable.
///
/// # Errors
///
/// Returns an error if the variable is not set.
fn env_required(key: &str) -> anyhow::Result<String> {
    std::env::var(key).map_err(|_| anyhow::anyhow!("Missing required environment variable: {}", key))
}

/// Load an environment variable with a default value.
///
/// # Errors
///
/// Returns an error if the variable is set but cannot be parsed.
fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", key, e)),
        Err(_) => Ok(default),
    }
}
