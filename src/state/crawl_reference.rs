use crate::state::CrawlState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Bookkeeping for one URL tracked across a crawl
///
/// The URL is the identity of the reference and never changes. Everything
/// else is filled in by pipeline stages as the document moves through them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlReference {
    url: Url,

    /// When the last fetch attempt happened
    pub crawl_date: Option<DateTime<Utc>>,

    /// Media type of the fetched document
    pub content_type: Option<String>,

    /// Character encoding of the fetched document
    pub content_encoding: Option<String>,

    /// Classification of the last fetch attempt, unset until classified
    pub state: Option<CrawlState>,

    /// Link depth from the start URLs
    pub depth: u32,

    /// URL of the document this reference was discovered from
    pub referrer: Option<Url>,

    /// URLs that redirected to this one, oldest first
    pub redirect_trail: Vec<Url>,
}

impl CrawlReference {
    /// Creates an unfetched reference at depth 0
    pub fn new(url: Url) -> Self {
        Self {
            url,
            crawl_date: None,
            content_type: None,
            content_encoding: None,
            state: None,
            depth: 0,
            referrer: None,
            redirect_trail: Vec::new(),
        }
    }

    /// Creates a reference for a redirect target of `parent`
    ///
    /// Redirects do not count as a link hop, so the depth is carried over.
    pub fn child(url: Url, parent: &CrawlReference) -> Self {
        let mut redirect_trail = parent.redirect_trail.clone();
        redirect_trail.push(parent.url.clone());

        Self {
            depth: parent.depth,
            referrer: Some(parent.url.clone()),
            redirect_trail,
            ..Self::new(url)
        }
    }

    /// The URL identifying this reference
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Returns true once a fetch attempt has stamped the crawl date
    pub fn is_crawled(&self) -> bool {
        self.crawl_date.is_some()
    }
}
