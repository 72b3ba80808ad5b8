pub mod thumbnails;
pub mod upload;
