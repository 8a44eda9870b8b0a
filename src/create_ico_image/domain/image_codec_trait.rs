use crate::infrastructure::error::InfrastructureError;
use image::{DynamicImage, RgbaImage};

// デコード・リサイズ・PNGエンコードは外部コーデックに任せる
#[cfg_attr(test, mockall::automock)]
pub trait ImageCodec {
    fn decode(&self, image_bytes: &[u8]) -> Result<DynamicImage, InfrastructureError>;

    fn resize(&self, source: &RgbaImage, width: u32, height: u32) -> Result<RgbaImage, InfrastructureError>;

    fn encode(&self, raster: &RgbaImage) -> Result<Vec<u8>, InfrastructureError>;
}
