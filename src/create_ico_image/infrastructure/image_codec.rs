use crate::domain::image_codec_trait::ImageCodec;
use super::error::InfrastructureError;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;

// ImageCodec の image クレートによる実装。出力は常に PNG
pub struct DefaultImageCodec {
    resize_filter: FilterType,
}

impl DefaultImageCodec {
    pub fn new(resize_filter: FilterType) -> Self {
        Self { resize_filter }
    }
}

impl ImageCodec for DefaultImageCodec {
    fn decode(&self, image_bytes: &[u8]) -> Result<DynamicImage, InfrastructureError> {
        let reader = image::io::Reader::new(Cursor::new(image_bytes))
            .with_guessed_format()
            .map_err(|e| InfrastructureError::DecodingError(format!("Cannot detect image format: {}", e)))?;
        if reader.format().is_none() {
            return Err(InfrastructureError::DecodingError("Unrecognized image format".to_string()));
        }
        reader
            .decode()
            .map_err(|e| InfrastructureError::DecodingError(e.to_string()))
    }

    fn resize(&self, source: &RgbaImage, width: u32, height: u32) -> Result<RgbaImage, InfrastructureError> {
        if width == 0 || height == 0 {
            return Err(InfrastructureError::ImageProcessingError(format!(
                "Cannot resize to {}x{}",
                width, height
            )));
        }
        Ok(imageops::resize(source, width, height, self.resize_filter))
    }

    fn encode(&self, raster: &RgbaImage) -> Result<Vec<u8>, InfrastructureError> {
        let mut buffer = Cursor::new(Vec::new());
        raster
            .write_to(&mut buffer, ImageFormat::Png)
            .map_err(|e| InfrastructureError::EncodingError(e.to_string()))?;
        Ok(buffer.into_inner())
    }
}
