use crate::error::ProcessError;
use crate::models::{PipelineConfig, ProcessingRequest, ProcessingResult, Strategy};
use crate::services::processor::{
    InlineProcessor, PatternProcessor, ProgressSender, WorkerProcessor,
};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Entry point for pipeline submissions.
///
/// The strategy is chosen once at construction. At most one request runs
/// at a time; a second submission is rejected with [`ProcessError::Busy`]
/// rather than queued.
pub struct PipelineOrchestrator {
    primary: Arc<dyn PatternProcessor>,
    fallback: Option<Arc<dyn PatternProcessor>>,
    in_flight: Arc<AtomicBool>,
}

impl PipelineOrchestrator {
    /// Select a strategy from configuration and the current runtime.
    ///
    /// The worker strategy needs a tokio runtime; without one the inline
    /// strategy is used. Inline fallback is only wired up behind the worker.
    pub fn from_config(config: &PipelineConfig) -> Self {
        let worker_available = tokio::runtime::Handle::try_current().is_ok();

        let orchestrator = match config.strategy {
            Strategy::Worker if worker_available => {
                let fallback: Option<Arc<dyn PatternProcessor>> = if config.retry_with_fallback {
                    Some(Arc::new(InlineProcessor))
                } else {
                    None
                };
                Self::with_processors(Arc::new(WorkerProcessor), fallback)
            }
            Strategy::Worker => {
                tracing::warn!("No tokio runtime available, using inline strategy");
                Self::with_processors(Arc::new(InlineProcessor), None)
            }
            Strategy::Inline => Self::with_processors(Arc::new(InlineProcessor), None),
        };

        tracing::info!(
            strategy = %orchestrator.strategy(),
            fallback = orchestrator.fallback.is_some(),
            "Pipeline strategy selected"
        );
        orchestrator
    }

    pub fn with_processors(
        primary: Arc<dyn PatternProcessor>,
        fallback: Option<Arc<dyn PatternProcessor>>,
    ) -> Self {
        Self {
            primary,
            fallback,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.primary.kind()
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Run one request on the selected strategy.
    pub async fn submit(
        &self,
        request: ProcessingRequest,
        progress: Option<ProgressSender>,
    ) -> Result<ProcessingResult, ProcessError> {
        request.validate()?;
        let guard = self.acquire()?;
        hold_until_done(guard, run_job(self.primary.clone(), None, request, progress)).await
    }

    /// Like [`submit`](Self::submit), but an execution fault on the primary
    /// strategy is retried once on the fallback strategy, if one is set.
    ///
    /// The retry reports no progress.
    pub async fn submit_with_fallback(
        &self,
        request: ProcessingRequest,
        progress: Option<ProgressSender>,
    ) -> Result<ProcessingResult, ProcessError> {
        request.validate()?;
        let guard = self.acquire()?;
        let job = run_job(self.primary.clone(), self.fallback.clone(), request, progress);
        hold_until_done(guard, job).await
    }

    fn acquire(&self) -> Result<InFlightGuard, ProcessError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| InFlightGuard(self.in_flight.clone()))
            .map_err(|_| {
                tracing::debug!("Rejecting request, another conversion is running");
                ProcessError::Busy
            })
    }
}

/// Clears the in-flight flag when dropped, including on error or panic.
struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Run `job` on its own task, which owns the in-flight slot.
///
/// Dropping the caller's future detaches the task instead of cancelling it,
/// so the slot stays claimed until the pipeline has actually stopped.
async fn hold_until_done<F>(
    guard: InFlightGuard,
    job: F,
) -> Result<ProcessingResult, ProcessError>
where
    F: Future<Output = Result<ProcessingResult, ProcessError>> + Send + 'static,
{
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => handle
            .spawn(async move {
                let _guard = guard;
                job.await
            })
            .await
            .map_err(|e| ProcessError::Execution(format!("Pipeline task failed: {e}")))?,
        Err(_) => {
            let _guard = guard;
            job.await
        }
    }
}

async fn run_job(
    primary: Arc<dyn PatternProcessor>,
    fallback: Option<Arc<dyn PatternProcessor>>,
    request: ProcessingRequest,
    progress: Option<ProgressSender>,
) -> Result<ProcessingResult, ProcessError> {
    let Some(fallback) = fallback else {
        return run(primary.as_ref(), request, progress).await;
    };

    let retry = request.clone();
    match run(primary.as_ref(), request, progress).await {
        Err(e) if e.is_execution_fault() => {
            tracing::warn!(
                error = %e,
                from = %primary.kind(),
                to = %fallback.kind(),
                "Pipeline failed, retrying with fallback strategy"
            );
            run(fallback.as_ref(), retry, None).await
        }
        other => other,
    }
}

async fn run(
    processor: &dyn PatternProcessor,
    request: ProcessingRequest,
    progress: Option<ProgressSender>,
) -> Result<ProcessingResult, ProcessError> {
    let strategy = processor.kind();
    let (width, height) = (request.settings.target_width, request.settings.target_height);
    let start = Instant::now();

    match processor.process(request, progress).await {
        Ok(pattern) => {
            let result = ProcessingResult::from_pattern(&pattern, start.elapsed());
            tracing::info!(
                %strategy,
                width,
                height,
                colors = result.stats.final_color_count,
                original_colors = result.stats.original_color_count,
                elapsed_ms = result.stats.processing_time_ms,
                "Conversion finished"
            );
            Ok(result)
        }
        Err(e) => {
            tracing::error!(%strategy, error = %e, "Conversion failed");
            Err(e)
        }
    }
}
