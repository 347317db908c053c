use crate::doc::Document;
use crate::fetch::FetchResponse;
use crate::FetchError;
use async_trait::async_trait;
use std::fmt;

/// HTTP method of a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Head,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Performs the network retrieval of a document
///
/// Ordinary failures (non-2xx statuses, timeouts, refused connections) are
/// reported as a `FetchResponse` with a non-good crawl state. `Err` is
/// reserved for faults that leave nothing to classify.
#[async_trait]
pub trait FetchClient: Send + Sync {
    async fn fetch(&self, doc: &Document, method: HttpMethod) -> Result<FetchResponse, FetchError>;
}
