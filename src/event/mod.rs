//! Crawler lifecycle events
//!
//! Every terminal disposition of a classified fetch is published as exactly
//! one [`CrawlerEvent`] so external monitoring can reconstruct fetch history.

mod sink;

pub use sink::{ChannelEventSink, EventSink, TracingEventSink};

use crate::fetch::FetchResponse;
use crate::state::{CrawlReference, CrawlState};
use std::fmt;

/// Kinds of events fired by the fetch stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Document was fetched with a good state
    DocumentFetched,

    /// Document was rejected because the server reported it missing
    RejectedNotFound,

    /// Document was rejected for any other non-good state
    RejectedBadStatus,
}

impl EventKind {
    /// Selects the event kind for a classified fetch
    ///
    /// Not-found is the only failure with a dedicated event. Every other
    /// failure collapses into `RejectedBadStatus`.
    pub fn for_state(state: CrawlState) -> Self {
        match state {
            CrawlState::New
            | CrawlState::Modified
            | CrawlState::Unmodified
            | CrawlState::Premature => Self::DocumentFetched,
            CrawlState::NotFound => Self::RejectedNotFound,
            CrawlState::BadStatus
            | CrawlState::Deleted
            | CrawlState::Rejected
            | CrawlState::Error => Self::RejectedBadStatus,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DocumentFetched => "DOCUMENT_FETCHED",
            Self::RejectedNotFound => "REJECTED_NOTFOUND",
            Self::RejectedBadStatus => "REJECTED_BAD_STATUS",
        }
    }

    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::DocumentFetched)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lifecycle event with the reference and response it concerns
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlerEvent {
    pub kind: EventKind,
    pub reference: CrawlReference,
    pub response: FetchResponse,
}

impl CrawlerEvent {
    pub fn new(kind: EventKind, reference: CrawlReference, response: FetchResponse) -> Self {
        Self {
            kind,
            reference,
            response,
        }
    }
}
