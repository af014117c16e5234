use std::fmt;
use thiserror::Error;

const KIB: usize = 1024;
const MIB: usize = 1024 * KIB;

/// A size limit rendered in the largest unit that divides it exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteLimit(pub usize);

impl fmt::Display for ByteLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => write!(f, "0 bytes"),
            n if n % MIB == 0 => write!(f, "{}MB", n / MIB),
            n if n % KIB == 0 => write!(f, "{}KB", n / KIB),
            n => write!(f, "{} bytes", n),
        }
    }
}

/// Client input rejected before any storage side effect.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("only image files may be uploaded")]
    NotAnImage { content_type: String },
    /// `size` is a lower bound when the upload was cut off while reading.
    #[error("file exceeds {limit}")]
    TooLarge { size: usize, limit: ByteLimit },
    #[error("unsupported image extension: {extension:?}")]
    UnsupportedExtension { extension: String },
    #[error("invalid user id")]
    InvalidUserId,
}

#[derive(Debug, Error)]
pub enum MediaError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("upload failed: {0}")]
    Upload(String),
    #[error("could not resolve public url: {0}")]
    Resolve(String),
}
