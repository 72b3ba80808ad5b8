use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::incoming::http_axum::dto::responses::ApiResponse;
use crate::shared::app_state::AppState;

pub async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<Value>> {
    let config = &state.config;
    Json(ApiResponse::success_with_data(Some(json!({
        "storage": {
            "backend": state.storage_backend,
            "source_bucket": config.storage.source_bucket,
            "thumbnail_bucket": config.storage.thumbnail_bucket
        },
        "thumbnail": {
            "max_width": config.thumbnail.max_width,
            "max_height": config.thumbnail.max_height,
            "scale_policy": config.thumbnail.scale_policy,
            "output_format": config.thumbnail.output_format
        }
    }))))
}
