pub mod error;
pub mod icon_dir;
pub mod image;
pub mod image_codec_trait;
