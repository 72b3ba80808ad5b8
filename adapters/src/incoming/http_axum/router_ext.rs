use axum::{Router, extract::DefaultBodyLimit, middleware};

use crate::incoming::http_axum::middleware::request_id::request_id_middleware;

pub trait RouterExt<State> {
    fn with_request_id(self) -> Self;
    fn with_body_limit(self, max_payload_bytes: usize) -> Self;
}

impl<State> RouterExt<State> for Router<State>
where
    State: Clone + Send + Sync + 'static,
{
    fn with_request_id(self) -> Self {
        self.layer(middleware::from_fn(request_id_middleware))
    }

    /// Upload bodies carry base64, which is a third larger than the decoded
    /// payload, plus the JSON envelope.
    fn with_body_limit(self, max_payload_bytes: usize) -> Self {
        let limit = max_payload_bytes
            .saturating_mul(4)
            .div_ceil(3)
            .saturating_add(1024);
        self.layer(DefaultBodyLimit::max(limit))
    }
}
