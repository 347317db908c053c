use crate::doc::Metadata;
use crate::state::CrawlState;
use url::Url;

/// Result of one fetch attempt
///
/// The classification and redirect target describe the outcome. Headers and
/// content are the payload; the fetch stage moves them into the document.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    /// Classification of the attempt
    pub crawl_state: CrawlState,

    /// HTTP status code, absent when no response was received
    pub status_code: Option<u16>,

    /// HTTP reason phrase or transport error description
    pub reason_phrase: Option<String>,

    /// Where the server redirected to, if it did
    pub redirect_target: Option<Url>,

    /// Raw response headers
    pub headers: Metadata,

    /// Response body
    pub content: Vec<u8>,
}

impl FetchResponse {
    pub fn new(crawl_state: CrawlState) -> Self {
        Self {
            crawl_state,
            status_code: None,
            reason_phrase: None,
            redirect_target: None,
            headers: Metadata::new(),
            content: Vec::new(),
        }
    }

    pub fn with_status(mut self, status_code: u16, reason_phrase: impl Into<String>) -> Self {
        self.status_code = Some(status_code);
        self.reason_phrase = Some(reason_phrase.into());
        self
    }

    pub fn with_reason(mut self, reason_phrase: impl Into<String>) -> Self {
        self.reason_phrase = Some(reason_phrase.into());
        self
    }

    pub fn with_redirect(mut self, target: Url) -> Self {
        self.redirect_target = Some(target);
        self
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.add(name, value);
        self
    }

    pub fn with_content(mut self, content: impl Into<Vec<u8>>) -> Self {
        self.content = content.into();
        self
    }

    /// Takes the headers and body out, leaving the outcome fields in place
    pub fn take_payload(&mut self) -> (Metadata, Vec<u8>) {
        (
            std::mem::take(&mut self.headers),
            std::mem::take(&mut self.content),
        )
    }
}
