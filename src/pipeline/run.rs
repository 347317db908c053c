use crate::config::Config;
use crate::event::TracingEventSink;
use crate::fetch::HttpFetchClient;
use crate::pipeline::{process_references, Collaborators, ImporterPipeline, ProcessedReference};
use crate::queue::MemoryCrawlQueue;
use crate::state::CrawlReference;
use std::sync::Arc;

/// What one run over a batch of references produced
#[derive(Debug)]
pub struct RunReport {
    /// Every input reference after its pipeline run, in input order
    pub processed: Vec<ProcessedReference>,

    /// Redirect targets queued during the run
    pub redirects: Vec<CrawlReference>,
}

impl RunReport {
    /// Number of references whose pipeline ended in a fault
    pub fn failures(&self) -> usize {
        self.processed.iter().filter(|p| p.result.is_err()).count()
    }
}

/// Fetches `references` with the HTTP client and settings from `config`
///
/// Events are logged through `tracing`. Start URLs are marked as seen, so a
/// redirect back to one of them is not queued again.
pub async fn run_fetch(
    config: &Config,
    references: Vec<CrawlReference>,
) -> crate::Result<RunReport> {
    let client = HttpFetchClient::new(&config.fetcher, &config.user_agent)?;
    let queue = Arc::new(MemoryCrawlQueue::with_max_redirects(
        config.queue.max_redirects,
    ));
    queue.mark_seen(references.iter().map(|r| r.url()))?;

    let collaborators = Collaborators::new(
        Arc::new(client),
        Arc::new(TracingEventSink),
        queue.clone(),
    );

    tracing::info!("Fetching {} URLs", references.len());
    let processed = process_references(
        Arc::new(ImporterPipeline::fetch_only()),
        collaborators,
        references,
        config.crawler.max_concurrent_fetches as usize,
    )
    .await;

    let redirects = queue.drain()?;
    tracing::info!(
        processed = processed.len(),
        redirects = redirects.len(),
        "Run finished"
    );

    Ok(RunReport {
        processed,
        redirects,
    })
}
