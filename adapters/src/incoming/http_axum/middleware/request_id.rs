use axum::http::HeaderValue;
use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Tags the request with an id and runs the rest of the stack inside a
/// `request` span carrying it, so pipeline logs for one invocation share it.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|header| header.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), ToString::to_string);

    let is_event_endpoint = request.uri().path().starts_with("/events/");
    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    );

    let header_value = HeaderValue::from_str(&request_id).ok();
    if let Some(value) = &header_value {
        request
            .headers_mut()
            .insert(REQUEST_ID_HEADER, value.clone());
    }

    async move {
        let started = Instant::now();
        if is_event_endpoint {
            info!("Processing storage event");
        }

        let mut response = next.run(request).await;

        if let Some(value) = header_value {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }

        if is_event_endpoint {
            info!(
                status = %response.status(),
                elapsed_ms = started.elapsed().as_millis(),
                "Storage event completed"
            );
        }
        response
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, middleware, routing::post};
    use std::fmt;
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;
    use tracing::{
        Event, Subscriber,
        field::{Field, Visit},
        span::{Attributes, Id},
        subscriber::set_default,
    };
    use tracing_subscriber::{
        Layer, Registry,
        layer::{Context, SubscriberExt},
        registry::LookupSpan,
    };

    struct SpanRequestId(String);

    struct RequestIdVisitor(Option<String>);

    impl Visit for RequestIdVisitor {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            if field.name() == "request_id" {
                self.0 = Some(format!("{value:?}"));
            }
        }
    }

    /// Collects the `request_id` of the enclosing span for every event.
    #[derive(Clone, Default)]
    struct SeenRequestIds(Arc<Mutex<Vec<String>>>);

    impl<S> Layer<S> for SeenRequestIds
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
            let mut visitor = RequestIdVisitor(None);
            attrs.record(&mut visitor);
            if let (Some(value), Some(span)) = (visitor.0, ctx.span(id)) {
                span.extensions_mut().insert(SpanRequestId(value));
            }
        }

        fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
            let Some(scope) = ctx.event_scope(event) else {
                self.0.lock().unwrap().push(String::new());
                return;
            };
            let id = scope
                .from_root()
                .find_map(|span| {
                    span.extensions()
                        .get::<SpanRequestId>()
                        .map(|SpanRequestId(value)| value.clone())
                })
                .unwrap_or_default();
            self.0.lock().unwrap().push(id);
        }
    }

    fn app() -> Router {
        Router::new()
            .route(
                "/events/s3",
                post(|| async {
                    info!("Generating thumbnail");
                    "ok"
                }),
            )
            .route(
                "/upload",
                post(|| async {
                    info!("Storing upload");
                    "ok"
                }),
            )
            .layer(middleware::from_fn(request_id_middleware))
    }

    #[tokio::test]
    async fn handler_logs_carry_the_incoming_request_id() {
        let seen = SeenRequestIds::default();
        let _guard = set_default(Registry::default().with(seen.clone()));

        let request = Request::builder()
            .method("POST")
            .uri("/events/s3")
            .header(REQUEST_ID_HEADER, "req-7")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.headers()[REQUEST_ID_HEADER], "req-7");
        let ids = seen.0.lock().unwrap().clone();
        assert!(ids.len() >= 3, "{ids:?}");
        assert!(ids.iter().all(|id| id == "req-7"), "{ids:?}");
    }

    #[tokio::test]
    async fn generated_id_is_shared_by_span_and_response() {
        let seen = SeenRequestIds::default();
        let _guard = set_default(Registry::default().with(seen.clone()));

        let request = Request::builder()
            .method("POST")
            .uri("/upload")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();

        let header = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
        assert!(Uuid::parse_str(header).is_ok());
        let ids = seen.0.lock().unwrap().clone();
        assert!(!ids.is_empty());
        assert!(ids.iter().all(|id| id == header), "{ids:?}");
    }
}
