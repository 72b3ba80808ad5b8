use std::io;
use thiserror::Error;

use domain::{error::DomainError, outcome::FailureKind};

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Decode error: {message}")]
    DecodeError { message: String },

    #[error("Encode error: {message}")]
    EncodeError { message: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("Object not found: {message}")]
    NotFound { message: String },

    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Task error: {message}")]
    TaskError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl AppError {
    /// Classification used when an error ends a transformation.
    #[must_use]
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            AppError::DecodeError { .. } => FailureKind::DecodeError,
            AppError::EncodeError { .. } => FailureKind::EncodeError,
            AppError::StorageError { .. } | AppError::NotFound { .. } | AppError::IoError(_) => {
                FailureKind::StorageError
            }
            _ => FailureKind::InternalError,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_like_errors_map_to_storage_failures() {
        let not_found = AppError::NotFound {
            message: "images/cat.png".to_string(),
        };
        assert_eq!(not_found.failure_kind(), FailureKind::StorageError);

        let io = AppError::IoError(io::Error::other("disk gone"));
        assert_eq!(io.failure_kind(), FailureKind::StorageError);
    }

    #[test]
    fn codec_errors_keep_their_kind() {
        let decode = AppError::DecodeError {
            message: "bad header".to_string(),
        };
        let encode = AppError::EncodeError {
            message: "writer closed".to_string(),
        };
        assert_eq!(decode.failure_kind(), FailureKind::DecodeError);
        assert_eq!(encode.failure_kind(), FailureKind::EncodeError);
    }

    #[test]
    fn everything_else_is_internal() {
        let task = AppError::TaskError {
            message: "join".to_string(),
        };
        assert_eq!(task.failure_kind(), FailureKind::InternalError);
    }
}
