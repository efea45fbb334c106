use thiserror::Error;

use crate::domain::frame::Resolution;

#[derive(Error, Debug, PartialEq)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Frame size mismatch: expected {expected}, got {actual}")]
    FrameSizeMismatch {
        expected: Resolution,
        actual: Resolution,
    },
}
