//! Document container passed between pipeline stages
//!
//! A [`Document`] holds the fetched bytes, the metadata collected while
//! fetching, and the document-level fields that mirror that metadata.

mod metadata;

pub use metadata::Metadata;

use url::Url;

/// Metadata key holding the normalized media type
pub const CONTENT_TYPE_KEY: &str = "document.contentType";

/// Metadata key holding the character encoding
pub const CONTENT_ENCODING_KEY: &str = "document.contentEncoding";

/// Metadata key holding the HTTP status code of the fetch
pub const HTTP_STATUS_CODE_KEY: &str = "collector.http-status-code";

/// Metadata key holding the HTTP reason phrase of the fetch
pub const HTTP_STATUS_REASON_KEY: &str = "collector.http-status-reason";

/// Document-level fields reconciled from metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocInfo {
    pub url: Url,
    pub content_type: Option<String>,
    pub content_encoding: Option<String>,
}

/// A document moving through the importer pipeline
#[derive(Debug, Clone)]
pub struct Document {
    pub info: DocInfo,
    pub metadata: Metadata,
    pub content: Vec<u8>,
}

impl Document {
    /// Creates an empty document for `url`
    pub fn new(url: Url) -> Self {
        Self {
            info: DocInfo {
                url,
                content_type: None,
                content_encoding: None,
            },
            metadata: Metadata::new(),
            content: Vec::new(),
        }
    }

    pub fn url(&self) -> &Url {
        &self.info.url
    }
}
