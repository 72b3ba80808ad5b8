use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{debug, error};

use thumbgen_application::error::AppError;

pub struct HttpError(pub AppError);

impl HttpError {
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            AppError::Domain(_) | AppError::ValidationError { .. } | AppError::JsonError(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::DecodeError { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::StorageError { .. } => StatusCode::BAD_GATEWAY,
            AppError::EncodeError { .. }
            | AppError::IoError(_)
            | AppError::TaskError { .. }
            | AppError::ConfigError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match &self.0 {
            AppError::JsonError(e) => format!("Invalid JSON format: {e}"),
            AppError::ConfigError { .. } => "Configuration error".to_string(),
            AppError::EncodeError { .. } | AppError::IoError(_) | AppError::TaskError { .. } => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        if status_code.is_client_error() {
            debug!("Client error response generated: {}", self.0);
        } else {
            error!("Server error response generated: {}", self.0);
        }

        let error_response = json!({
            "ok": false,
            "error": self.public_message(),
            "status": status_code.as_u16()
        });

        (status_code, Json(error_response)).into_response()
    }
}

impl From<AppError> for HttpError {
    fn from(app_error: AppError) -> Self {
        HttpError(app_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use domain::error::DomainError;
    use serde_json::Value;

    #[test]
    fn maps_errors_to_status_codes() {
        let cases = [
            (
                AppError::Domain(DomainError::InvalidObjectKey("..".to_string())),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::DecodeError {
                    message: "bad".to_string(),
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::StorageError {
                    message: "down".to_string(),
                },
                StatusCode::BAD_GATEWAY,
            ),
            (
                AppError::TaskError {
                    message: "panic".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(HttpError(error).status_code(), expected);
        }
    }

    #[tokio::test]
    async fn internal_details_are_not_leaked() {
        let response = HttpError(AppError::EncodeError {
            message: "libpng exploded at 0xdeadbeef".to_string(),
        })
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["ok"], false);
        assert_eq!(body["error"], "Internal server error");
        assert_eq!(body["status"], 500);
    }
}
