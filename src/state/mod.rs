//! State module for tracking crawl progress of a single URL
//!
//! # Components
//!
//! - `CrawlState`: Classification of a fetch attempt (new, not found, bad status, etc.)
//! - `CrawlReference`: Per-URL bookkeeping mutated by the pipeline stages

mod crawl_reference;
mod crawl_state;

// Re-export main types
pub use crawl_reference::CrawlReference;
pub use crawl_state::CrawlState;
