//! Configuration module for DocFetch
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use docfetch::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("docfetch.toml")).unwrap();
//! println!("Request timeout: {}ms", config.fetcher.request_timeout_ms);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, FetcherConfig, QueueConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
