use std::sync::Arc;
use super::error::ApplicationError;
use crate::domain::image::{RasterVariant, SourceImage};
use crate::domain::image_codec_trait::ImageCodec;

// target_sizes の順に1サイズずつリサイズする
pub fn generate(
    codec: &dyn ImageCodec,
    source: &SourceImage,
    target_sizes: &[u32],
) -> Result<Vec<RasterVariant>, ApplicationError> {
    let mut variants = Vec::with_capacity(target_sizes.len());
    for &size in target_sizes {
        let variant = RasterVariant::new(codec.resize(source.pixels(), size, size)?);
        log::debug!("Resized {}x{} source to {}x{}", source.width(), source.height(), variant.width(), variant.height());
        variants.push(variant);
    }
    Ok(variants)
}

// サイズごとに blocking タスクでリサイズする。全タスクの終了を待ってから
// target_sizes の順で結果を返すので、順序と報告されるエラーは generate と同じ
pub async fn generate_parallel(
    codec: Arc<dyn ImageCodec + Send + Sync>,
    source: Arc<SourceImage>,
    target_sizes: &[u32],
) -> Result<Vec<RasterVariant>, ApplicationError> {
    let handles: Vec<_> = target_sizes
        .iter()
        .map(|&size| {
            let codec = Arc::clone(&codec);
            let source = Arc::clone(&source);
            tokio::task::spawn_blocking(move || codec.resize(source.pixels(), size, size))
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await);
    }

    let mut variants = Vec::with_capacity(results.len());
    for result in results {
        let pixels = result.map_err(anyhow::Error::from)??;
        variants.push(RasterVariant::new(pixels));
    }
    Ok(variants)
}
