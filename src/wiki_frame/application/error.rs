use thiserror::Error;

use crate::domain::error::DomainError; // ドメインエラーをラップするため
use crate::infrastructure::error::InfrastructureError; // InfrastructureError をラップするため

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Domain error occurred: {0}")]
    DomainError(#[from] DomainError),

    #[error("Infrastructure error occurred: {0}")]
    InfrastructureError(#[from] InfrastructureError),
}

impl ApplicationError {
    /// Short name of the failure class, used in the final log line.
    pub fn kind(&self) -> &'static str {
        match self {
            ApplicationError::ConfigurationError(_) => "ConfigurationError",
            ApplicationError::DomainError(_) => "InvalidImage",
            ApplicationError::InfrastructureError(infra_err) => match infra_err {
                InfrastructureError::NetworkError(_) => "NetworkError",
                InfrastructureError::ParseError(_) => "ParseError",
                InfrastructureError::DecodeError(_) => "DecodeError",
                InfrastructureError::DeviceError(_) => "DeviceError",
            },
        }
    }
}
