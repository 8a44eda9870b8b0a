pub mod error;
pub mod external_image_fetcher;
pub mod file_storage;
pub mod image_codec;
