use crate::event::{CrawlerEvent, EventKind};
use tokio::sync::mpsc::UnboundedSender;

/// Publishes crawler events
///
/// Firing is fire-and-forget: implementations must not block on subscribers
/// and must not fail the caller.
pub trait EventSink: Send + Sync {
    fn fire(&self, event: CrawlerEvent);
}

/// Logs every event through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn fire(&self, event: CrawlerEvent) {
        let url = event.reference.url();
        let status = event.response.status_code;
        let state = event.response.crawl_state;

        match event.kind {
            EventKind::DocumentFetched => {
                tracing::info!(event = %event.kind, %url, ?status, %state, "Document fetched");
            }
            EventKind::RejectedNotFound | EventKind::RejectedBadStatus => {
                tracing::warn!(
                    event = %event.kind,
                    %url,
                    ?status,
                    %state,
                    reason = event.response.reason_phrase.as_deref().unwrap_or(""),
                    "Document rejected"
                );
            }
        }
    }
}

/// Forwards events to an unbounded tokio channel
#[derive(Debug, Clone)]
pub struct ChannelEventSink {
    sender: UnboundedSender<CrawlerEvent>,
}

impl ChannelEventSink {
    pub fn new(sender: UnboundedSender<CrawlerEvent>) -> Self {
        Self { sender }
    }
}

impl EventSink for ChannelEventSink {
    fn fire(&self, event: CrawlerEvent) {
        if let Err(e) = self.sender.send(event) {
            tracing::debug!(event = %e.0.kind, "Event receiver dropped, discarding event");
        }
    }
}
