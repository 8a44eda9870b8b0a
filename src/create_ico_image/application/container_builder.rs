use std::io::Write;
use std::iter;
use super::error::ApplicationError;
use crate::domain::icon_dir::IconDirectory;
use crate::domain::image::{RasterVariant, SourceImage};
use crate::domain::image_codec_trait::ImageCodec;

// レイアウト: ICONDIR, ICONDIRENTRY[], PNGデータ[]
pub struct ContainerBuilder<'a> {
    codec: &'a dyn ImageCodec,
}

impl<'a> ContainerBuilder<'a> {
    pub fn new(codec: &'a dyn ImageCodec) -> Self {
        Self { codec }
    }

    // 全ペイロードのエンコードが終わるまで sink には何も書かない
    pub fn build<W: Write>(
        &self,
        variants: &[RasterVariant],
        original: &SourceImage,
        sink: &mut W,
    ) -> Result<IconDirectory, ApplicationError> {
        let mut directory = IconDirectory::with_image_count(variants.len() + 1)?;
        let mut payloads: Vec<Vec<u8>> = Vec::with_capacity(variants.len() + 1);

        // 小さいサイズが先、元画像は常に最後
        let rasters = variants
            .iter()
            .map(RasterVariant::pixels)
            .chain(iter::once(original.pixels()));

        for raster in rasters {
            let payload = self.codec.encode(raster)?;
            let entry = directory.push_png(raster.width(), raster.height(), payload.len())?;
            log::debug!(
                "Storing {}x{} image with size {} at offset {}",
                raster.width(),
                raster.height(),
                entry.image_data_size,
                entry.image_data_offset
            );
            payloads.push(payload);
        }

        debug_assert!(directory.is_complete());

        write_container(&directory, &payloads, sink).map_err(ApplicationError::SinkWriteFailure)?;
        Ok(directory)
    }
}

fn write_container<W: Write>(directory: &IconDirectory, payloads: &[Vec<u8>], sink: &mut W) -> std::io::Result<()> {
    directory.write_to(sink)?;
    log::debug!("Wrote header and {} directory entries", directory.entries().len());

    for (payload, entry) in payloads.iter().zip(directory.entries()) {
        sink.write_all(payload)?;
        log::debug!("Wrote PNG ({} bytes, offset = {})", payload.len(), entry.image_data_offset);
    }
    sink.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::DomainError;
    use crate::domain::icon_dir::read_directory;
    use crate::domain::image_codec_trait::MockImageCodec;
    use crate::infrastructure::error::InfrastructureError;
    use crate::infrastructure::image_codec::DefaultImageCodec;
    use image::imageops::FilterType;
    use image::{DynamicImage, Rgba, RgbaImage};
    use std::io;

    fn original() -> SourceImage {
        let img = RgbaImage::from_pixel(256, 256, Rgba([0, 128, 255, 255]));
        SourceImage::from_decoded(DynamicImage::ImageRgba8(img)).unwrap()
    }

    fn variants(sizes: &[u32]) -> Vec<RasterVariant> {
        sizes.iter().map(|&s| RasterVariant::new(RgbaImage::new(s, s))).collect()
    }

    // ペイロードの中身は幅を埋めたバイト列、長さは幅 + 3
    fn fake_codec() -> MockImageCodec {
        let mut codec = MockImageCodec::new();
        codec
            .expect_encode()
            .returning(|raster| Ok(vec![raster.width() as u8; raster.width() as usize + 3]));
        codec
    }

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_build_default_sizes_layout() {
        let codec = fake_codec();
        let mut out = Vec::new();
        let directory = ContainerBuilder::new(&codec)
            .build(&variants(&[16, 24, 32, 48]), &original(), &mut out)
            .unwrap();

        let (header, entries) = read_directory(&out);
        assert_eq!(header.reserved, 0);
        assert_eq!(header.image_type, 1);
        assert_eq!(header.num_images, 5);
        assert_eq!(entries.as_slice(), directory.entries());

        let widths: Vec<u8> = entries.iter().map(|e| e.width).collect();
        assert_eq!(widths, vec![16, 24, 32, 48, 0]);
        let last = entries.last().unwrap();
        assert_eq!((last.width_pixels(), last.height_pixels()), (256, 256));

        for entry in &entries {
            assert_eq!(entry.num_colors, 0);
            assert_eq!(entry.reserved, 0);
            assert_eq!(entry.color_planes, 0);
            assert_eq!(entry.bits_per_pixel, 32);
        }
    }

    #[test]
    fn test_build_offsets_are_contiguous() {
        let codec = fake_codec();
        let mut out = Vec::new();
        ContainerBuilder::new(&codec)
            .build(&variants(&[16, 24, 32, 48]), &original(), &mut out)
            .unwrap();

        let (_, entries) = read_directory(&out);
        assert_eq!(entries[0].image_data_offset, 6 + 16 * 5);
        for pair in entries.windows(2) {
            assert_eq!(pair[0].image_data_offset + pair[0].image_data_size, pair[1].image_data_offset);
        }

        let payload_total: u32 = entries.iter().map(|e| e.image_data_size).sum();
        assert_eq!(out.len() as u32, 6 + 16 * 5 + payload_total);
        let last = entries.last().unwrap();
        assert_eq!(out.len() as u32, last.image_data_offset + last.image_data_size);

        // 各ペイロードが指定オフセットにそのまま入っていること
        for entry in &entries {
            let start = entry.image_data_offset as usize;
            let end = start + entry.image_data_size as usize;
            let expected_byte = entry.width_pixels() as u8;
            assert!(out[start..end].iter().all(|&b| b == expected_byte));
        }
    }

    #[test]
    fn test_build_with_no_variants() {
        let codec = fake_codec();
        let mut out = Vec::new();
        let directory = ContainerBuilder::new(&codec).build(&[], &original(), &mut out).unwrap();

        assert_eq!(directory.header().num_images, 1);
        let (_, entries) = read_directory(&out);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].width, 0);
        assert_eq!(entries[0].image_data_offset, 22);
        assert_eq!(out.len(), 22 + 259);
    }

    #[test]
    fn test_build_keeps_duplicate_256_entry() {
        let codec = fake_codec();
        let mut out = Vec::new();
        let directory = ContainerBuilder::new(&codec)
            .build(&variants(&[256]), &original(), &mut out)
            .unwrap();

        let widths: Vec<u8> = directory.entries().iter().map(|e| e.width).collect();
        assert_eq!(widths, vec![0, 0]);
    }

    #[test]
    fn test_build_capacity_exceeded_writes_nothing() {
        let mut codec = MockImageCodec::new();
        codec.expect_encode().never();

        let too_many = vec![RasterVariant::new(RgbaImage::new(1, 1)); 65535];
        let mut out = Vec::new();
        let result = ContainerBuilder::new(&codec).build(&too_many, &original(), &mut out);

        match result {
            Err(ApplicationError::DomainError(DomainError::CapacityExceeded { count, max })) => {
                assert_eq!(count, 65536);
                assert_eq!(max, 65535);
            }
            other => panic!("Expected CapacityExceeded, got {:?}", other),
        }
        assert!(out.is_empty());
    }

    #[test]
    fn test_build_encode_failure_writes_nothing() {
        let mut codec = MockImageCodec::new();
        codec.expect_encode().returning(|raster| {
            if raster.width() == 32 {
                Err(InfrastructureError::EncodingError("cannot encode".to_string()))
            } else {
                Ok(vec![0; 10])
            }
        });

        let mut out = Vec::new();
        let result = ContainerBuilder::new(&codec).build(&variants(&[16, 32, 48]), &original(), &mut out);

        assert!(matches!(
            result,
            Err(ApplicationError::InfrastructureError(InfrastructureError::EncodingError(_)))
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_build_surfaces_sink_failure() {
        let codec = fake_codec();
        let result = ContainerBuilder::new(&codec).build(&variants(&[16]), &original(), &mut FailingSink);

        match result {
            Err(ApplicationError::SinkWriteFailure(e)) => {
                assert_eq!(e.kind(), io::ErrorKind::Other);
                assert_eq!(e.to_string(), "disk full");
            }
            other => panic!("Expected SinkWriteFailure, got {:?}", other),
        }
    }

    #[test]
    fn test_build_with_real_codec_embeds_pngs() {
        let codec = DefaultImageCodec::new(FilterType::Triangle);
        let mut out = Vec::new();
        let directory = ContainerBuilder::new(&codec)
            .build(&variants(&[16, 48]), &original(), &mut out)
            .unwrap();

        assert_eq!(out.len() as u32, directory.total_len());
        for entry in directory.entries() {
            let start = entry.image_data_offset as usize;
            let end = start + entry.image_data_size as usize;
            let decoded = image::load_from_memory(&out[start..end]).unwrap();
            assert_eq!(decoded.width(), entry.width_pixels());
            assert_eq!(decoded.height(), entry.height_pixels());
        }
    }
}
