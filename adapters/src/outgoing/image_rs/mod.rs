pub mod thumbnail_renderer_image;
