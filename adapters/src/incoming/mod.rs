pub mod events;
pub mod http_axum;
