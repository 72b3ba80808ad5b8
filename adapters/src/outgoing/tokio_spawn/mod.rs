use std::future::Future;
use std::pin::Pin;

use tokio::task::spawn_blocking;
use tracing::Span;

use thumbgen_application::{
    error::{AppError, AppResult},
    ports::outgoing::blocking_task::{BlockingTaskPort, RenderJob},
};

pub struct TokioBlockingTaskAdapter;

impl TokioBlockingTaskAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TokioBlockingTaskAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockingTaskPort for TokioBlockingTaskAdapter {
    fn run_render(
        &self,
        job: RenderJob,
    ) -> Pin<Box<dyn Future<Output = AppResult<Vec<u8>>> + Send + 'static>> {
        let span = Span::current();
        Box::pin(async move {
            spawn_blocking(move || span.in_scope(job))
                .await
                .map_err(|e| AppError::TaskError {
                    message: format!("Render task did not complete: {e}"),
                })?
        })
    }
}
