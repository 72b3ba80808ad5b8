use axum::{Json, body::Bytes, extract::State, http::StatusCode};
use tracing::debug;

use crate::incoming::events::ProviderEventAdapter;
use crate::incoming::http_axum::{dto::responses::TransformResponse, error_mapper::HttpError};
use crate::shared::app_state::AppState;

/// `POST /events/{provider}`: translate the provider payload, then run the
/// thumbnail use case. A payload that does not translate never reaches it.
pub async fn handle_provider_event<P: ProviderEventAdapter>(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<TransformResponse>), HttpError> {
    let event = P::translate_json(&body).map_err(HttpError)?;
    debug!(
        provider = P::PROVIDER,
        source_bucket = %event.source_bucket,
        source_key = %event.source_key,
        "Translated storage event"
    );

    let result = state.generate_thumbnail_use_case.handle_event(event).await;
    let (status_code, response) = TransformResponse::from_result(&result);
    Ok((status_code, Json(response)))
}
