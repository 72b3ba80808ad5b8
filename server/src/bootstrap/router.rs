use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::bootstrap::state::AppState;
use thumbgen_adapters::incoming::http_axum::routes::build_application_router;
use thumbgen_adapters::shared::app_state::AppState as AdaptersAppState;

const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

pub fn create_router(state: &AppState) -> Router {
    let adapters_state = state.to_adapters_state();
    let cors_layer = create_cors_layer(&adapters_state);

    build_application_router(&adapters_state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer),
        )
        .with_state(adapters_state)
}

fn create_cors_layer(state: &AdaptersAppState) -> CorsLayer {
    let base_cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
            HeaderName::from_static("x-request-id"),
        ]);

    match &state.config.server.cors_origin {
        Some(origin) => base_cors.allow_origin(
            origin
                .parse::<HeaderValue>()
                .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_CORS_ORIGIN)),
        ),
        None => base_cors.allow_origin(HeaderValue::from_static(DEFAULT_CORS_ORIGIN)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header::ACCESS_CONTROL_ALLOW_ORIGIN},
    };
    use thumbgen_application::infrastructure_config::Config;
    use tower::ServiceExt;

    #[tokio::test]
    async fn health_answers_with_cors_header() {
        let mut config = Config::default();
        config.server.cors_origin = Some("https://gallery.example".to_string());
        let state = AppState::new(config).await.unwrap();

        let response = create_router(&state)
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("Origin", "https://gallery.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://gallery.example"
        );
    }

    #[tokio::test]
    async fn unknown_provider_is_404() {
        let state = AppState::new(Config::default()).await.unwrap();
        let request = Request::builder()
            .method("POST")
            .uri("/events/gcs")
            .body(Body::from(r#"{"bucket":"images","name":"cat.png"}"#))
            .unwrap();
        let response = create_router(&state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
