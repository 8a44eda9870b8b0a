use thiserror::Error;

#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Image processing failed: {0}")]
    ImageProcessingError(String),

    #[error("Image encoding failed: {0}")]
    EncodingError(String),

    #[error("File storage error: {0}")]
    FileStorageError(String),

    #[error("External API call failed: {0}")]
    ExternalApiError(String),

    #[error("Data decoding failed: {0}")]
    DecodingError(String),

    #[error("Underlying I/O error")]
    IoError(#[from] std::io::Error), // std::io::Error をラップ

    #[error("Reqwest error")]
    ReqwestError(#[from] reqwest::Error), // reqwest::Error をラップ

    #[error("Base64 decode error")]
    Base64DecodeError(#[from] base64::DecodeError),
}
