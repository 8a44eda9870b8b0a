use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum DomainError {
    #[error("Source image should be exactly {required}x{required}, got {width}x{height}")]
    InvalidDimensions {
        width: u32,
        height: u32,
        required: u32,
    },

    #[error("Source image should be 32-bit RGBA, got {0}")]
    InvalidPixelFormat(String),

    // 1 + 可変長のバリアント数が u16 に収まらない
    #[error("Icon container can hold at most {max} images, got {count}")]
    CapacityExceeded { count: usize, max: usize },

    #[error("Dimension {0} cannot be stored in a single-byte directory field")]
    UnrepresentableDimension(u32),

    #[error("Payload layout exceeds the 32-bit offset range")]
    ContainerTooLarge,

    #[error("Icon directory already holds all {0} declared entries")]
    DirectoryFull(usize),
}
