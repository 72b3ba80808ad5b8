use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use tracing::debug;
use validator::Validate;

use crate::incoming::http_axum::{
    dto::{
        requests::{UploadQuery, UploadRequest},
        responses::UploadResponse,
    },
    error_mapper::HttpError,
};
use crate::shared::app_state::AppState;
use thumbgen_application::{
    error::{AppError, AppResult},
    upload::service::{UploadCommand, UploadReceipt},
};

/// `POST /upload` with `{data, filename?}`. The filename may also come from
/// the query string; the body wins.
pub async fn upload_image(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    match store_upload(&state, query, &headers, &body).await {
        Ok(receipt) => (
            StatusCode::OK,
            Json(UploadResponse::new(StatusCode::OK, receipt.key)),
        )
            .into_response(),
        Err(error) => {
            let error = HttpError(error);
            if error.status_code() == StatusCode::BAD_REQUEST {
                debug!("Rejected upload: {}", error.0);
                (
                    StatusCode::BAD_REQUEST,
                    Json(UploadResponse::new(StatusCode::BAD_REQUEST, error.0.to_string())),
                )
                    .into_response()
            } else {
                error.into_response()
            }
        }
    }
}

async fn store_upload(
    state: &AppState,
    query: UploadQuery,
    headers: &HeaderMap,
    body: &[u8],
) -> AppResult<UploadReceipt> {
    let request: UploadRequest = serde_json::from_slice(body)?;
    request.validate().map_err(|e| AppError::ValidationError {
        message: e.to_string(),
    })?;

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string);

    let command = UploadCommand {
        data: request.data,
        filename: request.filename.or(query.filename),
        content_type,
    };
    state.upload_use_case.upload(command).await
}
