use thiserror::Error;

#[derive(Error, Debug)]
pub enum InfrastructureError {
    /// Unreachable host, timeout or a non-2xx status.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The fetched page lacks the markup we scrape.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The body is not an image we can decode.
    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Device error: {0}")]
    DeviceError(String),
}

impl From<reqwest::Error> for InfrastructureError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest のメッセージには URL とステータスが含まれる
        InfrastructureError::NetworkError(err.to_string())
    }
}

impl From<image::ImageError> for InfrastructureError {
    fn from(err: image::ImageError) -> Self {
        InfrastructureError::DecodeError(err.to_string())
    }
}

impl From<base64::DecodeError> for InfrastructureError {
    fn from(err: base64::DecodeError) -> Self {
        InfrastructureError::DecodeError(format!("invalid base64 payload: {}", err))
    }
}
