use std::{fmt, str::FromStr};

/// Named partitions of the object store used by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// One profile image per user, keyed `<user_id>/avatar.<ext>`.
    Avatars,
    /// Course detail and gallery images.
    CourseImages,
}

impl Bucket {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Avatars => "avatars",
            Self::CourseImages => "course-images",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "avatars" => Ok(Self::Avatars),
            "course-images" => Ok(Self::CourseImages),
            other => Err(format!("unknown bucket: {}", other)),
        }
    }
}
