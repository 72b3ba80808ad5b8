use axum::http::StatusCode;
use serde::Serialize;

use domain::outcome::{FailureKind, TransformResult};

#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    #[must_use]
    pub fn success_with_data(data: Option<T>) -> Self {
        Self {
            ok: true,
            error: None,
            data,
        }
    }
}

/// Outbound result of a storage event: `{status, mimeType?, exception?, message?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl TransformResponse {
    pub fn from_result(result: &TransformResult) -> (StatusCode, Self) {
        let status = result.status();
        match result {
            TransformResult::Success { mime_type, .. } => (
                StatusCode::OK,
                Self {
                    status,
                    mime_type: Some(mime_type.clone()),
                    exception: None,
                    message: None,
                },
            ),
            TransformResult::Skipped(reason) => (
                StatusCode::OK,
                Self {
                    status,
                    mime_type: None,
                    exception: None,
                    message: Some(reason.message().to_string()),
                },
            ),
            TransformResult::Failed { kind, message } => (
                failure_status(*kind),
                Self {
                    status,
                    mime_type: None,
                    exception: Some(kind.as_str()),
                    message: Some(message.clone()),
                },
            ),
        }
    }
}

fn failure_status(kind: FailureKind) -> StatusCode {
    match kind {
        FailureKind::StorageError => StatusCode::BAD_GATEWAY,
        FailureKind::DecodeError => StatusCode::UNPROCESSABLE_ENTITY,
        FailureKind::EncodeError | FailureKind::InternalError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Upload handler reply, `{code, message}` like the function runtimes returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadResponse {
    pub code: u16,
    pub message: String,
}

impl UploadResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: status.as_u16(),
            message: message.into(),
        }
    }
}
