use crate::error::ProcessError;
use crate::models::{ProcessingRequest, ProgressEvent, Strategy};
use async_trait::async_trait;
use bead_convert::{Pattern, Stage};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tokio::sync::mpsc::UnboundedSender;

pub type ProgressSender = UnboundedSender<ProgressEvent>;

/// One way of running the conversion pipeline.
#[async_trait]
pub trait PatternProcessor: Send + Sync {
    fn kind(&self) -> Strategy;

    /// Run the pipeline for an already validated request.
    async fn process(
        &self,
        request: ProcessingRequest,
        progress: Option<ProgressSender>,
    ) -> Result<Pattern, ProcessError>;
}

/// Runs the pipeline on tokio's blocking pool and forwards progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct WorkerProcessor;

#[async_trait]
impl PatternProcessor for WorkerProcessor {
    fn kind(&self) -> Strategy {
        Strategy::Worker
    }

    async fn process(
        &self,
        request: ProcessingRequest,
        progress: Option<ProgressSender>,
    ) -> Result<Pattern, ProcessError> {
        tokio::task::spawn_blocking(move || {
            run_pipeline(&request, |stage| {
                tracing::debug!(?stage, percent = stage.percent(), "Pipeline stage");
                if let Some(tx) = &progress {
                    // Receiver may be gone; progress is advisory.
                    let _ = tx.send(ProgressEvent::from(stage));
                }
            })
        })
        .await
        .map_err(|e| ProcessError::Execution(format!("Worker task failed: {e}")))?
    }
}

/// Runs the pipeline on the caller's thread without progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineProcessor;

#[async_trait]
impl PatternProcessor for InlineProcessor {
    fn kind(&self) -> Strategy {
        Strategy::Inline
    }

    async fn process(
        &self,
        request: ProcessingRequest,
        _progress: Option<ProgressSender>,
    ) -> Result<Pattern, ProcessError> {
        catch_unwind(AssertUnwindSafe(|| run_pipeline(&request, |_| {})))
            .map_err(|payload| ProcessError::Execution(panic_message(payload.as_ref())))?
    }
}

/// The four pipeline steps shared by every strategy.
pub fn run_pipeline(
    request: &ProcessingRequest,
    progress: impl FnMut(Stage),
) -> Result<Pattern, ProcessError> {
    request
        .settings
        .converter()?
        .convert_with_progress(&request.source_bitmap, progress)
        .map_err(|e| ProcessError::Execution(e.to_string()))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("Pipeline panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("Pipeline panicked: {s}")
    } else {
        "Pipeline panicked".to_string()
    }
}
