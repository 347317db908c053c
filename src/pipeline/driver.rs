use crate::pipeline::{Collaborators, ImporterPipeline, PipelineContext};
use crate::state::CrawlReference;
use crate::{StageError, StageResult};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// A reference after its pipeline run
#[derive(Debug)]
pub struct ProcessedReference {
    pub reference: CrawlReference,

    /// Continuation signal of the pipeline, or the fault that aborted it
    pub result: StageResult<bool>,
}

/// Runs `pipeline` once per reference, at most `max_concurrent` at a time
///
/// Each reference gets its own task and its own context; nothing mutable is
/// shared between tasks. There is exactly one result per input reference, in
/// input order. A task that panics yields its untouched input reference with
/// `StageError::Aborted`.
pub async fn process_references(
    pipeline: Arc<ImporterPipeline>,
    collaborators: Collaborators,
    references: Vec<CrawlReference>,
    max_concurrent: usize,
) -> Vec<ProcessedReference> {
    let semaphore = Arc::new(Semaphore::new(max_concurrent.max(1)));
    let total = references.len();
    let mut tasks = Vec::with_capacity(total);

    for reference in references {
        let pipeline = Arc::clone(&pipeline);
        let collaborators = collaborators.clone();
        let semaphore = Arc::clone(&semaphore);
        let original = reference.clone();

        let handle = tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok();
            let mut ctx = PipelineContext::new(reference, collaborators);
            let result = pipeline.execute(&mut ctx).await;
            if let Err(e) = &result {
                tracing::error!(url = %ctx.reference.url(), error = %e, "Pipeline failed");
            }
            ProcessedReference {
                reference: ctx.into_reference(),
                result,
            }
        });
        tasks.push((original, handle));
    }

    let mut processed = Vec::with_capacity(total);
    for (original, handle) in tasks {
        match handle.await {
            Ok(item) => processed.push(item),
            Err(e) => {
                tracing::error!(url = %original.url(), error = %e, "Pipeline task aborted");
                processed.push(ProcessedReference {
                    reference: original,
                    result: Err(StageError::Aborted(e.to_string())),
                });
            }
        }
    }

    tracing::debug!(total, "All references processed");
    processed
}
