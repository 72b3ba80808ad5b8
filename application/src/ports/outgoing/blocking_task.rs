use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::AppResult;

pub type RenderJob = Box<dyn FnOnce() -> AppResult<Vec<u8>> + Send + 'static>;

/// Runs CPU-bound rendering off the async executor and waits for it.
pub trait BlockingTaskPort: Send + Sync {
    fn run_render(
        &self,
        job: RenderJob,
    ) -> Pin<Box<dyn Future<Output = AppResult<Vec<u8>>> + Send + 'static>>;
}

pub type DynBlockingTaskPort = Arc<dyn BlockingTaskPort>;
