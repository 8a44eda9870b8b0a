use crate::domain::error::DomainError;
use image::{ColorType, DynamicImage, RgbaImage};

/// 入力画像の必須サイズ (正方形)
pub const REQUIRED_DIMENSION: u32 = 256;

#[derive(Debug, Clone)]
pub struct SourceImage {
    pixels: RgbaImage,
}

impl SourceImage {
    pub fn from_decoded(decoded: DynamicImage) -> Result<Self, DomainError> {
        let (width, height) = (decoded.width(), decoded.height());
        if width != REQUIRED_DIMENSION || height != REQUIRED_DIMENSION {
            return Err(DomainError::InvalidDimensions {
                width,
                height,
                required: REQUIRED_DIMENSION,
            });
        }

        if decoded.color() != ColorType::Rgba8 {
            return Err(DomainError::InvalidPixelFormat(format!("{:?}", decoded.color())));
        }

        Ok(Self {
            pixels: decoded.into_rgba8(),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

#[derive(Debug, Clone)]
pub struct RasterVariant {
    pixels: RgbaImage,
}

impl RasterVariant {
    pub fn new(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}
