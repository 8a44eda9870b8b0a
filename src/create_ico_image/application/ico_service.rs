use std::io;
use std::sync::Arc;
use super::config::IcoConfig;
use super::container_builder::ContainerBuilder;
use super::error::ApplicationError;
use super::resolution_set;

use crate::domain::icon_dir::IconDirectory;
use crate::domain::image::SourceImage;
use crate::domain::image_codec_trait::ImageCodec;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::external_image_fetcher::DefaultExternalImageFetcher;
use crate::infrastructure::file_storage::LocalFileStorage;

pub struct IcoService {
    codec: Arc<dyn ImageCodec + Send + Sync>, // トレイトオブジェクトとして保持
    storage: LocalFileStorage,
    fetcher: DefaultExternalImageFetcher,
    config: IcoConfig,
}

impl IcoService {
    pub fn new(codec: Arc<dyn ImageCodec + Send + Sync>, config: IcoConfig) -> Self {
        Self {
            codec,
            storage: LocalFileStorage::new(),
            fetcher: DefaultExternalImageFetcher::new(),
            config,
        }
    }

    async fn load_source_bytes(&self, source: &str) -> Result<Vec<u8>, ApplicationError> {
        if DefaultExternalImageFetcher::handles(source) {
            return Ok(self.fetcher.fetch_image_from_url_impl(source).await?);
        }
        if !self.storage.exists(source).await {
            return Err(ApplicationError::SourceNotFound(source.to_string()));
        }
        Ok(self.storage.read_image_impl(source).await?)
    }

    // 出力ファイルはコンテナ全体がメモリ上で完成してから書き込む
    pub async fn create_icon(&self, source: &str, output_path: &str) -> Result<IconDirectory, ApplicationError> {
        log::info!("Creating icon from {} with sizes {:?}", source, self.config.target_sizes);

        let bytes = self.load_source_bytes(source).await?;
        let decoded = self.codec.decode(&bytes)?;
        let original = Arc::new(SourceImage::from_decoded(decoded)?);

        let variants = if self.config.parallel_resize {
            resolution_set::generate_parallel(Arc::clone(&self.codec), Arc::clone(&original), &self.config.target_sizes)
                .await?
        } else {
            resolution_set::generate(self.codec.as_ref(), &original, &self.config.target_sizes)?
        };

        let mut container = Vec::new();
        let directory = ContainerBuilder::new(self.codec.as_ref()).build(&variants, &original, &mut container)?;
        drop(variants);

        debug_assert_eq!(container.len() as u64, u64::from(directory.total_len()));
        for entry in directory.entries() {
            log::debug!(
                "{}x{} entry: {} bytes at offset {}",
                entry.width_pixels(),
                entry.height_pixels(),
                entry.image_data_size,
                entry.image_data_offset
            );
        }

        self.storage
            .save_image_impl(output_path, &container)
            .await
            .map_err(into_sink_failure)?;
        log::info!(
            "Wrote {} images ({} bytes) to {}",
            directory.header().num_images,
            container.len(),
            output_path
        );

        Ok(directory)
    }
}

// 出力先への書き込み失敗は元の io::Error を保ったまま SinkWriteFailure にする
fn into_sink_failure(err: InfrastructureError) -> ApplicationError {
    match err {
        InfrastructureError::IoError(e) => ApplicationError::SinkWriteFailure(e),
        other => ApplicationError::SinkWriteFailure(io::Error::new(io::ErrorKind::InvalidInput, other)),
    }
}
