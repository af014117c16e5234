pub mod memory_storage;
pub mod public_url;
pub mod s3_storage_service;
pub mod traits;
