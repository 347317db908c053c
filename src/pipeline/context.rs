use crate::doc::Document;
use crate::event::{CrawlerEvent, EventKind, EventSink};
use crate::fetch::{FetchClient, FetchResponse};
use crate::metadata::{HttpHeaderEnhancer, MetadataEnhancer};
use crate::queue::CrawlQueue;
use crate::state::CrawlReference;
use std::sync::Arc;

/// Collaborator handles shared by every document of a run
#[derive(Clone)]
pub struct Collaborators {
    pub fetch_client: Arc<dyn FetchClient>,
    pub event_sink: Arc<dyn EventSink>,
    pub queue: Arc<dyn CrawlQueue>,
    pub enhancer: Arc<dyn MetadataEnhancer>,
}

impl Collaborators {
    /// Bundles the collaborators with the HTTP header enhancer
    pub fn new(
        fetch_client: Arc<dyn FetchClient>,
        event_sink: Arc<dyn EventSink>,
        queue: Arc<dyn CrawlQueue>,
    ) -> Self {
        Self {
            fetch_client,
            event_sink,
            queue,
            enhancer: Arc::new(HttpHeaderEnhancer),
        }
    }

    pub fn with_enhancer(mut self, enhancer: Arc<dyn MetadataEnhancer>) -> Self {
        self.enhancer = enhancer;
        self
    }
}

/// Transient state for one document moving through the pipeline
///
/// A context is owned by a single pipeline invocation and never shared.
pub struct PipelineContext {
    pub reference: CrawlReference,
    pub document: Document,
    collaborators: Collaborators,
}

impl PipelineContext {
    pub fn new(reference: CrawlReference, collaborators: Collaborators) -> Self {
        let document = Document::new(reference.url().clone());
        Self {
            reference,
            document,
            collaborators,
        }
    }

    pub fn fetch_client(&self) -> &Arc<dyn FetchClient> {
        &self.collaborators.fetch_client
    }

    pub fn event_sink(&self) -> &Arc<dyn EventSink> {
        &self.collaborators.event_sink
    }

    pub fn queue(&self) -> &Arc<dyn CrawlQueue> {
        &self.collaborators.queue
    }

    pub fn enhancer(&self) -> &Arc<dyn MetadataEnhancer> {
        &self.collaborators.enhancer
    }

    /// Fires `kind` with a snapshot of the current reference
    pub fn fire_event(&self, kind: EventKind, response: &FetchResponse) {
        self.event_sink().fire(CrawlerEvent::new(
            kind,
            self.reference.clone(),
            response.clone(),
        ));
    }

    /// Ends the context, keeping the reference
    pub fn into_reference(self) -> CrawlReference {
        self.reference
    }
}
