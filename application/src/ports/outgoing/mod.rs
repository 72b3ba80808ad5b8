pub mod blocking_task;
pub mod object_store;
pub mod thumbnail_renderer;
