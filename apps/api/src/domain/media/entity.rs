use bytes::Bytes;

/// An image file as declared by the client.
///
/// `content_type` is taken at face value; the bytes are never sniffed.
#[derive(Debug, Clone)]
pub struct AvatarFile {
    pub name: String,
    pub content_type: String,
    pub data: Bytes,
    /// Set when reading stopped early because the body outgrew the limit.
    /// `data` then holds only a prefix.
    pub truncated: bool,
}

impl AvatarFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, data: Bytes) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data,
            truncated: false,
        }
    }

    pub fn mark_truncated(mut self) -> Self {
        self.truncated = true;
        self
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}
