pub(crate) mod error_mapper;
pub(crate) mod router_ext;

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
