//! Crawl queue for newly discovered references
//!
//! The fetch stage hands redirect targets to a [`CrawlQueue`] instead of
//! processing them inline. Deduplication and redirect-depth policy belong to
//! the queue.

mod memory;

pub use memory::MemoryCrawlQueue;

use crate::state::CrawlReference;
use crate::QueueError;
use url::Url;

/// Accepts references for future processing
pub trait CrawlQueue: Send + Sync {
    /// Queues `reference`, returning false if the queue chose to drop it
    fn enqueue(&self, reference: CrawlReference) -> Result<bool, QueueError>;
}

/// Queues the redirect target of `origin` as a new reference
///
/// The new reference inherits the depth of `origin` and records it as both
/// referrer and the latest hop of its redirect trail.
pub fn queue_redirect_url(
    queue: &dyn CrawlQueue,
    origin: &CrawlReference,
    target: Url,
) -> Result<bool, QueueError> {
    tracing::debug!(from = %origin.url(), to = %target, "Queueing redirect target");
    let reference = CrawlReference::child(target, origin);
    queue.enqueue(reference)
}
