//! DocFetch: the document fetch stage of a crawl pipeline
//!
//! This crate retrieves a single web document, classifies the outcome of the
//! retrieval, and decides whether the pipeline continues with the document,
//! reroutes to a redirect target, or rejects it.

pub mod config;
pub mod doc;
pub mod event;
pub mod fetch;
pub mod metadata;
pub mod pipeline;
pub mod queue;
pub mod state;

use thiserror::Error;

/// Errors that abort a whole run before or after the per-document pipelines
#[derive(Debug, Error)]
pub enum DocFetchError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),
}

/// Faults a fetch client cannot express as a crawl state
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Unusable response from {url}: {message}")]
    InvalidResponse { url: String, message: String },
}

/// Crawl queue errors
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("Crawl queue lock poisoned")]
    Poisoned,

    #[error("Crawl queue is closed")]
    Closed,
}

/// Errors that abort a pipeline stage for the current document
#[derive(Debug, Error)]
pub enum StageError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error("Pipeline task aborted: {0}")]
    Aborted(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for DocFetch operations
pub type Result<T> = std::result::Result<T, DocFetchError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for pipeline stage operations
pub type StageResult<T> = std::result::Result<T, StageError>;

// Re-export commonly used types
pub use config::Config;
pub use doc::{DocInfo, Document, Metadata};
pub use event::{CrawlerEvent, EventKind, EventSink};
pub use fetch::{FetchClient, FetchResponse, HttpFetchClient, HttpMethod};
pub use pipeline::{
    run_fetch, Collaborators, FetchOutcome, FetchStage, ImporterPipeline, PipelineContext,
    RunReport,
};
pub use queue::{CrawlQueue, MemoryCrawlQueue};
pub use state::{CrawlReference, CrawlState};
