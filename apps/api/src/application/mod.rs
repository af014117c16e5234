pub mod resolve_image_url;
pub mod upload_avatar;
