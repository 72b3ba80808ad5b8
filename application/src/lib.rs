#[cfg(any(
    feature = "adapters",
    feature = "axum",
    feature = "aws-sdk-s3",
    feature = "image"
))]
compile_error!("application must not depend on adapters/framework crates");

pub mod config;
pub mod error;
pub mod infrastructure_config;
pub mod ports;
pub mod thumbnails;
pub mod upload;

#[cfg(test)]
mod test_support;
