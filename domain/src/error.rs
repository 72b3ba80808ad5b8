use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid bounding box: {0}")]
    InvalidBoundingBox(String),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Invalid object key: {0}")]
    InvalidObjectKey(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
