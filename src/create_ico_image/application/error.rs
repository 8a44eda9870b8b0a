use thiserror::Error;
use crate::domain::error::DomainError; // ドメインエラーをラップするため
use crate::infrastructure::error::InfrastructureError; // InfrastructureError をラップするため

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("File does not exist: {0}")]
    SourceNotFound(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Writing the icon container failed")]
    SinkWriteFailure(#[source] std::io::Error),

    #[error("Domain error occurred: {0}")]
    DomainError(#[from] DomainError), // ドメインエラーをラップ

    #[error("Infrastructure error occurred: {0}")]
    InfrastructureError(#[from] InfrastructureError), // InfrastructureError をラップ

    #[error("Underlying error: {source:?}")]
    AnyhowError {
        #[from]
        source: anyhow::Error,
    },
}
