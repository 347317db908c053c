//! Fetch module for document retrieval
//!
//! This module contains:
//! - The `FetchClient` seam the fetch stage calls through
//! - `FetchResponse`, the classified result of one fetch attempt
//! - `HttpFetchClient`, the reqwest-backed client used in production

mod client;
mod http;
mod response;

pub use client::{FetchClient, HttpMethod};
pub use http::{build_http_client, classify_status, HttpFetchClient};
pub use response::FetchResponse;
