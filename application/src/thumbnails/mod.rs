pub mod pipeline;
pub mod service;
