//! Integration tests for the fetch stage
//!
//! These tests use wiremock to serve real HTTP responses and run the
//! reqwest-backed client through the fetch stage end-to-end.

mod fetch_stage_tests;
