use crate::queue::CrawlQueue;
use crate::state::CrawlReference;
use crate::QueueError;
use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard};
use url::Url;

#[derive(Debug, Default)]
struct Inner {
    pending: VecDeque<CrawlReference>,
    seen: HashSet<Url>,
    closed: bool,
}

/// In-memory FIFO queue with URL deduplication
///
/// References whose redirect trail is longer than `max_redirects`, or whose
/// URL was already queued once, are dropped.
#[derive(Debug)]
pub struct MemoryCrawlQueue {
    inner: Mutex<Inner>,
    max_redirects: Option<usize>,
}

impl MemoryCrawlQueue {
    /// Creates an unbounded queue
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            max_redirects: None,
        }
    }

    /// Creates a queue that drops references after `max_redirects` hops
    pub fn with_max_redirects(max_redirects: usize) -> Self {
        Self {
            max_redirects: Some(max_redirects),
            ..Self::new()
        }
    }

    /// Marks URLs as already seen, e.g. the start URLs of a run
    pub fn mark_seen<'a>(&self, urls: impl IntoIterator<Item = &'a Url>) -> Result<(), QueueError> {
        let mut inner = self.lock()?;
        inner.seen.extend(urls.into_iter().cloned());
        Ok(())
    }

    /// Removes and returns the oldest pending reference
    pub fn pop(&self) -> Result<Option<CrawlReference>, QueueError> {
        Ok(self.lock()?.pending.pop_front())
    }

    /// Removes and returns every pending reference in FIFO order
    pub fn drain(&self) -> Result<Vec<CrawlReference>, QueueError> {
        Ok(self.lock()?.pending.drain(..).collect())
    }

    /// Rejects all further enqueues
    pub fn close(&self) -> Result<(), QueueError> {
        self.lock()?.closed = true;
        Ok(())
    }

    pub fn len(&self) -> Result<usize, QueueError> {
        Ok(self.lock()?.pending.len())
    }

    pub fn is_empty(&self) -> Result<bool, QueueError> {
        Ok(self.lock()?.pending.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, QueueError> {
        self.inner.lock().map_err(|_| QueueError::Poisoned)
    }
}

impl Default for MemoryCrawlQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl CrawlQueue for MemoryCrawlQueue {
    fn enqueue(&self, reference: CrawlReference) -> Result<bool, QueueError> {
        let mut inner = self.lock()?;
        if inner.closed {
            return Err(QueueError::Closed);
        }

        if let Some(max) = self.max_redirects {
            if reference.redirect_trail.len() > max {
                tracing::warn!(
                    url = %reference.url(),
                    hops = reference.redirect_trail.len(),
                    "Redirect limit exceeded, dropping reference"
                );
                return Ok(false);
            }
        }

        if !inner.seen.insert(reference.url().clone()) {
            tracing::debug!(url = %reference.url(), "Already queued, dropping reference");
            return Ok(false);
        }

        inner.pending.push_back(reference);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::queue_redirect_url;

    fn reference(s: &str) -> CrawlReference {
        CrawlReference::new(Url::parse(s).unwrap())
    }

    #[test]
    fn test_fifo_order() {
        let queue = MemoryCrawlQueue::new();
        assert!(queue.enqueue(reference("https://example.com/a")).unwrap());
        assert!(queue.enqueue(reference("https://example.com/b")).unwrap());

        assert_eq!(queue.len().unwrap(), 2);
        assert_eq!(queue.pop().unwrap().unwrap().url().path(), "/a");
        assert_eq!(queue.pop().unwrap().unwrap().url().path(), "/b");
        assert!(queue.is_empty().unwrap());
        assert!(queue.pop().unwrap().is_none());
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let queue = MemoryCrawlQueue::new();
        assert!(queue.enqueue(reference("https://example.com/a")).unwrap());
        assert!(!queue.enqueue(reference("https://example.com/a")).unwrap());
        assert_eq!(queue.len().unwrap(), 1);
    }

    #[test]
    fn test_mark_seen_blocks_start_urls() {
        let queue = MemoryCrawlQueue::new();
        let start = Url::parse("https://example.com/").unwrap();
        queue.mark_seen([&start]).unwrap();

        assert!(!queue.enqueue(CrawlReference::new(start)).unwrap());
    }

    #[test]
    fn test_redirect_limit() {
        let queue = MemoryCrawlQueue::with_max_redirects(1);
        let first = reference("https://example.com/1");
        let second = CrawlReference::child(Url::parse("https://example.com/2").unwrap(), &first);
        let third = CrawlReference::child(Url::parse("https://example.com/3").unwrap(), &second);

        assert!(queue.enqueue(second).unwrap());
        assert!(!queue.enqueue(third).unwrap());
    }

    #[test]
    fn test_closed_queue_errors() {
        let queue = MemoryCrawlQueue::new();
        queue.close().unwrap();

        let result = queue.enqueue(reference("https://example.com/a"));
        assert!(matches!(result, Err(QueueError::Closed)));
    }

    #[test]
    fn test_queue_redirect_url_builds_child() {
        let queue = MemoryCrawlQueue::new();
        let mut origin = reference("https://example.com/old");
        origin.depth = 2;

        let accepted = queue_redirect_url(
            &queue,
            &origin,
            Url::parse("https://example.com/new").unwrap(),
        )
        .unwrap();

        assert!(accepted);
        let queued = queue.drain().unwrap();
        assert_eq!(queued.len(), 1);
        assert_eq!(queued[0].url().as_str(), "https://example.com/new");
        assert_eq!(queued[0].depth, 2);
        assert_eq!(queued[0].referrer.as_ref(), Some(origin.url()));
        assert_eq!(queued[0].redirect_trail, vec![origin.url().clone()]);
    }
}
