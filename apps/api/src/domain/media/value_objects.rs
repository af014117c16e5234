use super::errors::ValidationError;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

lazy_static! {
    static ref USER_ID_REGEX: regex::Regex = regex::Regex::new(r"^[A-Za-z0-9_-]{1,128}$").unwrap();
}

/// Extensions accepted for avatar keys, lower-case.
pub const ALLOWED_AVATAR_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "avif"];

/// Historical prefix once stored in image paths.
pub const LEGACY_PREFIX: &str = "public/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct UserId {
    #[validate(regex(path = *USER_ID_REGEX))]
    pub value: String,
}

impl UserId {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let user_id = Self {
            value: value.into(),
        };
        user_id
            .validate()
            .map_err(|_| ValidationError::InvalidUserId)?;
        Ok(user_id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarExtension(String);

impl AvatarExtension {
    /// Takes the text after the last `.` of `file_name`, lower-cased, and
    /// checks it against [`ALLOWED_AVATAR_EXTENSIONS`].
    pub fn from_file_name(file_name: &str) -> Result<Self, ValidationError> {
        let raw = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .unwrap_or_default();
        let normalized = raw.to_ascii_lowercase();
        if ALLOWED_AVATAR_EXTENSIONS.contains(&normalized.as_str()) {
            Ok(Self(normalized))
        } else {
            Err(ValidationError::UnsupportedExtension {
                extension: raw.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Storage key of a user's avatar: `<user_id>/avatar.<extension>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarKey {
    user_id: UserId,
    extension: AvatarExtension,
}

impl AvatarKey {
    pub fn new(user_id: UserId, extension: AvatarExtension) -> Self {
        Self { user_id, extension }
    }

    pub fn derive(user_id: &str, file_name: &str) -> Result<Self, ValidationError> {
        let user_id = UserId::new(user_id)?;
        let extension = AvatarExtension::from_file_name(file_name)?;
        Ok(Self::new(user_id, extension))
    }

    /// Every key this user's avatar could occupy, one per allowed extension.
    ///
    /// Removing all of them before an upload leaves at most one avatar
    /// object per user even when the extension changes.
    pub fn all_variants(&self) -> Vec<String> {
        ALLOWED_AVATAR_EXTENSIONS
            .iter()
            .map(|ext| format!("{}/avatar.{}", self.user_id, ext))
            .collect()
    }
}

impl fmt::Display for AvatarKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/avatar.{}", self.user_id, self.extension.as_str())
    }
}

/// A stored image path as read from a persisted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageReference<'a> {
    /// Missing, empty or blank.
    Empty,
    /// `http://` or `https://` URL, used as is.
    Absolute(&'a str),
    /// `/...` static asset path, used as is.
    RootRelative(&'a str),
    /// Object name left after stripping [`LEGACY_PREFIX`].
    Legacy(&'a str),
    /// Plain object name.
    Object(&'a str),
}

impl<'a> ImageReference<'a> {
    pub fn parse(path: Option<&'a str>) -> Self {
        let Some(path) = path.filter(|p| !p.trim().is_empty()) else {
            return Self::Empty;
        };

        if path.starts_with("http://") || path.starts_with("https://") {
            Self::Absolute(path)
        } else if path.starts_with('/') {
            Self::RootRelative(path)
        } else if let Some(name) = path.strip_prefix(LEGACY_PREFIX) {
            if name.is_empty() {
                Self::Empty
            } else {
                Self::Legacy(name)
            }
        } else {
            Self::Object(path)
        }
    }

    /// Object name to look up in the store, if this reference needs one.
    pub fn object_name(&self) -> Option<&'a str> {
        match *self {
            Self::Legacy(name) | Self::Object(name) => Some(name),
            Self::Empty | Self::Absolute(_) | Self::RootRelative(_) => None,
        }
    }
}
