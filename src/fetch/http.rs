//! HTTP fetch client
//!
//! This module performs the actual requests for the fetch stage:
//! - Building HTTP clients with proper user agent strings
//! - GET and HEAD requests
//! - Surfacing redirects in the response instead of following them
//! - Classifying statuses and transport failures into crawl states

use crate::config::{FetcherConfig, UserAgentConfig};
use crate::doc::{Document, Metadata, HTTP_STATUS_CODE_KEY, HTTP_STATUS_REASON_KEY};
use crate::fetch::{FetchClient, FetchResponse, HttpMethod};
use crate::state::CrawlState;
use crate::FetchError;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// Redirects are never followed by the client; they are reported back so the
/// pipeline can queue the target as its own reference.
///
/// # Example
///
/// ```no_run
/// use docfetch::config::{FetcherConfig, UserAgentConfig};
/// use docfetch::fetch::build_http_client;
///
/// let user_agent = UserAgentConfig {
///     crawler_name: "DocFetch".to_string(),
///     crawler_version: "0.1".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&FetcherConfig::default(), &user_agent).unwrap();
/// ```
pub fn build_http_client(
    fetcher: &FetcherConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_millis(fetcher.request_timeout_ms))
        .connect_timeout(Duration::from_millis(fetcher.connect_timeout_ms))
        .redirect(Policy::none())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Maps an HTTP status to a crawl state
///
/// | Status | State |
/// |--------|-------|
/// | 2xx | New |
/// | 404, 410 | NotFound |
/// | anything else | BadStatus |
pub fn classify_status(status: StatusCode) -> CrawlState {
    if status.is_success() {
        CrawlState::New
    } else if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
        CrawlState::NotFound
    } else {
        CrawlState::BadStatus
    }
}

/// Fetch client backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpFetchClient {
    client: Client,
}

impl HttpFetchClient {
    pub fn new(fetcher: &FetcherConfig, user_agent: &UserAgentConfig) -> Result<Self, FetchError> {
        let client = build_http_client(fetcher, user_agent).map_err(FetchError::ClientBuild)?;
        Ok(Self { client })
    }

    /// Wraps an already configured client
    ///
    /// The client should not follow redirects, or redirect targets are lost.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FetchClient for HttpFetchClient {
    async fn fetch(&self, doc: &Document, method: HttpMethod) -> Result<FetchResponse, FetchError> {
        let url = doc.url();
        if !matches!(url.scheme(), "http" | "https") {
            return Err(FetchError::UnsupportedScheme(url.scheme().to_string()));
        }

        tracing::debug!(%url, %method, "Sending request");
        let request = match method {
            HttpMethod::Get => self.client.get(url.clone()),
            HttpMethod::Head => self.client.head(url.clone()),
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return classify_transport_error(url, e),
        };

        let status = response.status();
        let headers = collect_headers(response.headers(), status);
        let redirect_target = redirect_target(url, status, &headers);

        let mut fetched = FetchResponse::new(classify_status(status)).with_status(
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
        );
        fetched.headers = headers;

        if let Some(target) = redirect_target {
            tracing::debug!(%url, %target, status = status.as_u16(), "Redirect received");
            return Ok(fetched.with_redirect(target));
        }

        if method == HttpMethod::Head || !status.is_success() {
            return Ok(fetched);
        }

        match response.bytes().await {
            Ok(body) => Ok(fetched.with_content(body.to_vec())),
            Err(e) => {
                tracing::warn!(%url, error = %e, "Failed to read response body");
                let mut failed = FetchResponse::new(CrawlState::Error)
                    .with_status(status.as_u16(), format!("Body read failed: {}", e));
                failed.headers = fetched.headers;
                Ok(failed)
            }
        }
    }
}

/// Classifies a failed send
///
/// Only request-building errors are faults; everything else is a crawl state.
fn classify_transport_error(url: &Url, e: reqwest::Error) -> Result<FetchResponse, FetchError> {
    if e.is_builder() {
        return Err(FetchError::Http {
            url: url.to_string(),
            source: e,
        });
    }

    let reason = if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        "Connection refused".to_string()
    } else {
        e.to_string()
    };

    tracing::debug!(%url, %reason, "Transport failure");
    Ok(FetchResponse::new(CrawlState::Error).with_reason(reason))
}

fn collect_headers(raw: &reqwest::header::HeaderMap, status: StatusCode) -> Metadata {
    let mut headers = Metadata::new();
    for (name, value) in raw {
        match value.to_str() {
            Ok(value) => headers.add(name.as_str(), value),
            Err(_) => tracing::trace!(header = %name, "Skipping non-ASCII header value"),
        }
    }

    headers.set(HTTP_STATUS_CODE_KEY, status.as_u16().to_string());
    if let Some(reason) = status.canonical_reason() {
        headers.set(HTTP_STATUS_REASON_KEY, reason);
    }
    headers
}

/// Resolves the `Location` header of a 3xx response against the request URL
fn redirect_target(url: &Url, status: StatusCode, headers: &Metadata) -> Option<Url> {
    if !status.is_redirection() {
        return None;
    }

    let location = headers.get_first("location")?.trim();
    if location.is_empty() {
        return None;
    }

    match url.join(location) {
        Ok(target) => Some(target),
        Err(e) => {
            tracing::warn!(%url, %location, error = %e, "Ignoring unparseable redirect location");
            None
        }
    }
}
