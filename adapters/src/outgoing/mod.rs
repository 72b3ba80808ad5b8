pub mod image_rs;
pub mod local_tokio_fs;
pub mod memory_dashmap;
pub mod s3_aws;
pub mod tokio_spawn;
